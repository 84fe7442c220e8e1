//! Compile-time tunables for the store.
//!
//! These mirror the reference implementation's constants (see the original
//! `kvs.h`): node fan-out, arena size, and the Bloom filter's growth
//! schedule. All are `pub const` rather than runtime configuration since
//! none of them are meant to vary between opens of the same store.

/// Maximum number of keys per B+tree node (one more child than keys for an
/// internal node). The reference value from the original implementation.
pub const NODE_ORDER: usize = 64;

/// Default size, in bytes, of the arena backing key/value byte storage.
pub const ARENA_DEFAULT: usize = 128 * 1024 * 1024;

/// Initial size of the Bloom filter's bit vector.
pub const BLOOM_INITIAL_BITS: usize = 1 << 20;

/// Upper bound on the Bloom filter's bit vector size.
pub const BLOOM_MAX_BITS: usize = 1 << 26;

/// Fill ratio (set bits / total bits) at which the Bloom filter grows.
pub const BLOOM_GROWTH_THRESHOLD: f64 = 0.5;

/// The Bloom filter's fill is checked every this-many puts.
pub const BLOOM_GROWTH_CHECK_STRIDE: u64 = 1000;
