//! MemTable Module
//!
//! The live, ordered key/value state of the store.
//!
//! ## Responsibilities
//! - Fast reads and writes in memory
//! - Concurrent readers and writers without external locking
//! - Lazy, weakly consistent range views
//! - Ordered iteration for snapshot creation
//!
//! ## Data Structure Choice
//! BTreeMap wrapped in a parking_lot RwLock:
//! - Keys ordered byte-wise (`Ord` for `[u8]`)
//! - Each operation holds the lock for a single map access
//! - Range cursors re-acquire the read lock per step, never across steps
//!
//! Deletes remove the key outright. Tombstones only exist as `Record`s in
//! flight and are never stored.

mod range;
mod table;

pub use range::Range;
pub use table::MemTable;
