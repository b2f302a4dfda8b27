//! Snapshot Module
//!
//! Single-file persistence for the store: loaded once on open, rewritten once
//! on close.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Record 1                                                │
//! │   KeyLen: i32 BE (4) | Key | ValLen: i32 BE (4) | Value │
//! ├─────────────────────────────────────────────────────────┤
//! │ Record 2                                                │
//! │   ... repeated for each entry, ascending key order ...  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! No header, footer, magic, version or checksum. A missing file is an empty
//! snapshot. The file must end exactly on a record boundary.
//!
//! The writer truncates the destination before writing, so a failed flush
//! leaves an incomplete or empty file behind.

mod reader;
mod writer;

use std::path::Path;

use crate::error::Result;
use crate::memtable::MemTable;

pub use reader::SnapshotReader;
pub use writer::SnapshotWriter;

/// Size of each length prefix: i32 big-endian
pub(crate) const LEN_PREFIX_SIZE: u64 = 4;

/// Largest field length an i32 prefix can describe
pub(crate) const MAX_FIELD_LEN: usize = i32::MAX as usize;

/// Summary of a snapshot load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Records decoded
    pub records: u64,
    /// Bytes consumed from the file
    pub bytes: u64,
}

/// Summary of a snapshot flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Records written
    pub records: u64,
    /// Bytes written to the file
    pub bytes: u64,
}

/// Populate `memtable` from the snapshot at `path`
///
/// A missing file yields empty stats and leaves the memtable untouched.
pub fn load(path: &Path, memtable: &MemTable) -> Result<LoadStats> {
    match SnapshotReader::open(path)? {
        Some(reader) => reader.load_into(memtable),
        None => Ok(LoadStats::default()),
    }
}

/// Replace the snapshot at `path` with the memtable's current contents
pub fn flush(path: &Path, memtable: &MemTable) -> Result<FlushStats> {
    let mut writer = SnapshotWriter::create(path)?;
    for record in memtable.iter() {
        let (key, value) = record.into_parts();
        // The memtable never yields tombstones.
        if let Some(value) = value {
            writer.append(&key, &value)?;
        }
    }
    writer.finish()
}
