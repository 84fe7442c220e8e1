//! Error handling and result types for store operations.
//!
//! Mirrors the shape of a typical arena/tree error enum (key-not-found,
//! allocation failure, I/O failure, corrupt-on-load) but derives
//! `Display`/`std::error::Error` via `thiserror` instead of a hand-rolled
//! `impl Display`.

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The byte arena backing keys/values/entries is exhausted.
    #[error("arena out of memory")]
    OutOfMemory,

    /// The requested key does not exist, or is tombstoned.
    #[error("key not found")]
    NotFound,

    /// A snapshot read or write failed at the OS level.
    #[error("snapshot I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),

    /// A snapshot file failed to parse: bad magic, short header, or short body.
    #[error("invalid snapshot: {0}")]
    Invalid(String),

    /// Reserved for future use; the core never emits this variant.
    #[error("store full")]
    Full,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
