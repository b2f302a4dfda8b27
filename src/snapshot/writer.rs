//! Snapshot Writer
//!
//! Writes sorted key/value pairs to a fresh snapshot file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bytes::{BufMut, BytesMut};

use crate::error::{Result, SnapError};

use super::{FlushStats, LEN_PREFIX_SIZE, MAX_FIELD_LEN};

/// Writer for a snapshot file
///
/// The destination is truncated as soon as the writer is created. Call
/// `append()` in ascending key order, then `finish()` to flush and fsync.
pub struct SnapshotWriter {
    path: PathBuf,
    /// Buffered writer for performance
    writer: BufWriter<File>,
    /// Reused per-record encoding buffer
    frame: BytesMut,
    records: u64,
    bytes: u64,
}

impl SnapshotWriter {
    /// Create (or truncate) the snapshot at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            frame: BytesMut::new(),
            records: 0,
            bytes: 0,
        })
    }

    /// Append one key/value pair
    pub fn append(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let key_len = field_len(key)?;
        let value_len = field_len(value)?;

        self.frame.clear();
        self.frame.reserve(2 * LEN_PREFIX_SIZE as usize + key.len() + value.len());
        self.frame.put_i32(key_len);
        self.frame.put_slice(key);
        self.frame.put_i32(value_len);
        self.frame.put_slice(value);

        self.writer.write_all(&self.frame)?;

        self.records += 1;
        self.bytes += self.frame.len() as u64;
        Ok(())
    }

    /// Flush buffered data and sync the file to disk
    pub fn finish(self) -> Result<FlushStats> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        Ok(FlushStats {
            records: self.records,
            bytes: self.bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn field_len(field: &[u8]) -> Result<i32> {
    if field.len() > MAX_FIELD_LEN {
        return Err(SnapError::RecordTooLarge { len: field.len() });
    }
    Ok(field.len() as i32)
}
