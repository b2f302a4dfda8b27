//! MemTable implementation
//!
//! BTreeMap-based memtable with RwLock for concurrency.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use parking_lot::RwLock;

use super::Range;
use crate::record::Record;

/// In-memory ordered table holding only live entries
pub struct MemTable {
    /// Sorted key → value map
    data: RwLock<BTreeMap<Bytes, Bytes>>,

    /// Approximate payload size in bytes (keys + values)
    size: AtomicUsize,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            size: AtomicUsize::new(0),
        }
    }

    /// Apply a record: a value inserts or overwrites, a tombstone removes
    pub fn upsert(&self, record: Record) {
        match record.into_parts() {
            (key, Some(value)) => self.put(key, value),
            (key, None) => {
                self.remove(&key);
            }
        }
    }

    /// Insert or overwrite `key`
    pub fn put(&self, key: Bytes, value: Bytes) {
        let key_len = key.len();
        let value_len = value.len();

        let mut data = self.data.write();
        match data.insert(key, value) {
            Some(old) => {
                self.size.fetch_add(value_len, Ordering::Relaxed);
                self.size.fetch_sub(old.len(), Ordering::Relaxed);
            }
            None => {
                self.size.fetch_add(key_len + value_len, Ordering::Relaxed);
            }
        }
    }

    /// Remove `key`, returning its previous value. Missing keys are a no-op.
    pub fn remove(&self, key: &[u8]) -> Option<Bytes> {
        let mut data = self.data.write();
        let old = data.remove_entry(key);
        if let Some((k, v)) = &old {
            self.size.fetch_sub(k.len() + v.len(), Ordering::Relaxed);
        }
        old.map(|(_, v)| v)
    }

    /// Get a value by key (read lock)
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.data.read().get(key).cloned()
    }

    /// Lazy view over keys in `[from, to)`; `None` leaves that side open
    pub fn range(&self, from: Option<&[u8]>, to: Option<&[u8]>) -> Range<'_> {
        let lower = match from {
            Some(k) => Bound::Included(Bytes::copy_from_slice(k)),
            None => Bound::Unbounded,
        };
        let upper = match to {
            Some(k) => Bound::Excluded(Bytes::copy_from_slice(k)),
            None => Bound::Unbounded,
        };
        Range::new(&self.data, lower, upper)
    }

    /// All entries in ascending key order
    pub fn iter(&self) -> Range<'_> {
        Range::new(&self.data, Bound::Unbounded, Bound::Unbounded)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Get approximate size in bytes
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}
