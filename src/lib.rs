//! # SnapKV
//!
//! A persistent, ordered key-value store with:
//! - Byte-wise ordered keys and half-open range queries
//! - Concurrent readers and writers with no external locking
//! - Single-file snapshot loaded on open and rewritten on close
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      SnapshotStore                           │
//! │              (range / get / upsert / close)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────────────┐
//!          │ open       │                     │ close
//!          ▼            ▼                     ▼
//!   ┌─────────────┐ ┌─────────────┐   ┌─────────────┐
//!   │  Snapshot   │ │  MemTable   │   │  Snapshot   │
//!   │   Reader    ├►│  (RwLock)   ├──►│   Writer    │
//!   └──────┬──────┘ └─────────────┘   └──────┬──────┘
//!          │                                 │
//!          └──────────► save.dat ◄───────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use snapkv::{Config, Record};
//!
//! let store = snapkv::open(Config::with_dir("./data"))?;
//! store.upsert(Record::of("1", "a"));
//! store.upsert(Record::of("2", "b"));
//!
//! for record in store.range(Some("1".as_bytes()), None) {
//!     println!("{:?}", record);
//! }
//!
//! store.close()?;
//! # Ok::<(), snapkv::SnapError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod memtable;
pub mod snapshot;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SnapError, Result};
pub use config::Config;
pub use record::Record;
pub use store::{KvStore, SnapshotStore};

/// Build a store from `config`, restoring any existing snapshot
pub fn open(config: Config) -> Result<SnapshotStore> {
    SnapshotStore::open(config)
}

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SnapKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
