//! An embedded, in-process, single-threaded ordered key-value store over
//! byte strings.
//!
//! A [`Store`] layers four pieces on top of a bump [`arena::Arena`] backing
//! key and value bytes: a B+tree index (`tree`) for ordered point and range
//! access, a dynamically growing Bloom filter (`bloom`) that short-circuits
//! negative lookups, a bidirectional [`cursor::Cursor`] over the leaf chain,
//! and a binary [`snapshot`] codec for whole-store persistence. Deletes are
//! tombstones; nothing is ever rebalanced or compacted.
//!
//! ```
//! use kvstore::Store;
//!
//! let mut store = Store::open(None).unwrap();
//! store.put(b"hello", b"world").unwrap();
//! assert_eq!(store.get(b"hello"), Some(b"world".as_slice()));
//! ```

pub mod arena;
pub mod bloom;
pub mod compact_arena;
pub mod config;
pub mod cursor;
pub mod error;
pub mod node;
pub mod snapshot;
pub mod store;
pub mod tree;

pub use cursor::Cursor;
pub use error::{Result, StoreError};
pub use store::{Stats, Store};
