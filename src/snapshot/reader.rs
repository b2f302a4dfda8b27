//! Snapshot Reader
//!
//! Sequentially decodes length-prefixed key/value pairs.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::error::{Result, SnapError};
use crate::memtable::MemTable;

use super::{LoadStats, LEN_PREFIX_SIZE};

/// Reads entries from a snapshot file
pub struct SnapshotReader {
    reader: BufReader<File>,
    /// Bytes consumed so far
    position: u64,
    /// File length at open time
    file_len: u64,
}

impl SnapshotReader {
    /// Open a snapshot for reading
    ///
    /// Returns `Ok(None)` when no snapshot exists at `path`.
    pub fn open(path: &Path) -> Result<Option<Self>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot found, starting empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let file_len = file.metadata()?.len();
        debug!(path = %path.display(), file_len, "opened snapshot");

        Ok(Some(Self {
            reader: BufReader::new(file),
            position: 0,
            file_len,
        }))
    }

    /// Read the next key/value pair
    ///
    /// Returns `Ok(None)` only when the stream ends exactly on a record
    /// boundary. Anything else that stops short is corruption.
    pub fn next_entry(&mut self) -> Result<Option<(Bytes, Bytes)>> {
        if self.position == self.file_len {
            return Ok(None);
        }

        let key = self.read_field("key")?;
        let value = self.read_field("value")?;
        Ok(Some((key, value)))
    }

    /// Decode every record into `memtable`
    ///
    /// Entries inserted before a failure stay in the memtable; the caller is
    /// expected to discard it.
    pub fn load_into(mut self, memtable: &MemTable) -> Result<LoadStats> {
        let mut records = 0u64;
        while let Some((key, value)) = self.next_entry()? {
            memtable.put(key, value);
            records += 1;
        }

        Ok(LoadStats {
            records,
            bytes: self.position,
        })
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    fn remaining(&self) -> u64 {
        self.file_len.saturating_sub(self.position)
    }

    fn read_field(&mut self, what: &str) -> Result<Bytes> {
        let offset = self.position;

        if self.remaining() < LEN_PREFIX_SIZE {
            return Err(SnapError::SnapshotCorrupted(format!(
                "truncated {} length prefix at offset {}: {} bytes left",
                what,
                offset,
                self.remaining()
            )));
        }

        let mut prefix = [0u8; LEN_PREFIX_SIZE as usize];
        self.reader.read_exact(&mut prefix)?;
        self.position += LEN_PREFIX_SIZE;

        let len = i32::from_be_bytes(prefix);
        if len < 0 {
            return Err(SnapError::SnapshotCorrupted(format!(
                "negative {} length {} at offset {}",
                what, len, offset
            )));
        }

        // Checked before allocating so a bogus prefix can't request gigabytes.
        let len = len as u64;
        if len > self.remaining() {
            return Err(SnapError::SnapshotCorrupted(format!(
                "{} length {} at offset {} exceeds the {} bytes left",
                what,
                len,
                offset,
                self.remaining()
            )));
        }

        let mut buf = BytesMut::zeroed(len as usize);
        self.reader.read_exact(&mut buf)?;
        self.position += len;

        Ok(buf.freeze())
    }
}
