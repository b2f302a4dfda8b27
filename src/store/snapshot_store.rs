//! Snapshot-backed store
//!
//! Wires the MemTable to the snapshot loader and writer.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::memtable::{MemTable, Range};
use crate::record::Record;
use crate::snapshot::{self, FlushStats};

use super::KvStore;

/// Persistent ordered key/value store
///
/// ## Concurrency
/// All queries and mutations take `&self` and may be called from many
/// threads (share it behind an `Arc`). `close()` consumes the store, so it
/// cannot overlap with mutations issued through the same owner.
///
/// ## Durability
/// Only `close()` persists data. Anything written after the last successful
/// close is lost if the process exits without closing.
pub struct SnapshotStore {
    /// Store configuration
    config: Config,

    /// `<data_dir>/<snapshot_file>`
    snapshot_path: PathBuf,

    /// Live state
    memtable: MemTable,
}

impl SnapshotStore {
    /// Open a store, restoring state from the snapshot if one exists
    ///
    /// On startup:
    /// 1. Validate config and create the data directory
    /// 2. Decode the snapshot into a fresh memtable
    /// 3. Ready to serve requests
    ///
    /// Any load failure aborts the open; no partially loaded store escapes.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        let snapshot_path = config.snapshot_path();
        let memtable = MemTable::new();
        let stats = snapshot::load(&snapshot_path, &memtable)?;

        info!(
            path = %snapshot_path.display(),
            records = stats.records,
            bytes = stats.bytes,
            "store opened"
        );

        Ok(Self {
            config,
            snapshot_path,
            memtable,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::with_dir(path))
    }

    /// Lazy ascending view over `[from, to)`
    pub fn range(&self, from: Option<&[u8]>, to: Option<&[u8]>) -> Range<'_> {
        self.memtable.range(from, to)
    }

    /// Apply a record (value = put, tombstone = delete)
    pub fn upsert(&self, record: Record) {
        self.memtable.upsert(record);
    }

    /// Get a value by key
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.memtable.get(key)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.memtable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memtable.is_empty()
    }

    /// Approximate payload size in bytes
    pub fn size(&self) -> usize {
        self.memtable.size()
    }

    /// Write the snapshot and release the store
    ///
    /// The old snapshot is truncated before the new one is written, so on
    /// error the file on disk may be incomplete or empty.
    pub fn close(self) -> Result<FlushStats> {
        match snapshot::flush(&self.snapshot_path, &self.memtable) {
            Ok(stats) => {
                info!(
                    path = %self.snapshot_path.display(),
                    records = stats.records,
                    bytes = stats.bytes,
                    "snapshot written"
                );
                Ok(stats)
            }
            Err(e) => {
                warn!(path = %self.snapshot_path.display(), error = %e, "snapshot flush failed");
                Err(e)
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        self.config.data_dir()
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl KvStore for SnapshotStore {
    type Range<'a> = Range<'a>;

    fn range<'a>(&'a self, from: Option<&[u8]>, to: Option<&[u8]>) -> Range<'a> {
        SnapshotStore::range(self, from, to)
    }

    fn upsert(&self, record: Record) {
        SnapshotStore::upsert(self, record)
    }

    fn get(&self, key: &[u8]) -> Option<Bytes> {
        SnapshotStore::get(self, key)
    }

    fn close(self) -> Result<()> {
        SnapshotStore::close(self).map(|_| ())
    }
}
