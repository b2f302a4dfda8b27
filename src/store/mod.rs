//! Store Module
//!
//! The public store contract and its snapshot-backed implementation.
//!
//! ## Lifecycle
//! ```text
//!   open(config) ──► load save.dat ──► serve range/get/upsert ──► close() ──► write save.dat
//! ```

mod snapshot_store;

use bytes::Bytes;

use crate::error::Result;
use crate::record::Record;

pub use snapshot_store::SnapshotStore;

/// Ordered key/value store contract
pub trait KvStore {
    /// Iterator returned by `range()` and `scan_prefix()`
    type Range<'a>: Iterator<Item = Record> + 'a
    where
        Self: 'a;

    /// Ascending entries with key in `[from, to)`; `None` leaves a side open
    fn range<'a>(&'a self, from: Option<&[u8]>, to: Option<&[u8]>) -> Self::Range<'a>;

    /// Insert/overwrite on a value, delete on a tombstone
    fn upsert(&self, record: Record);

    /// Point lookup
    fn get(&self, key: &[u8]) -> Option<Bytes>;

    /// Ascending entries whose key starts with `prefix`
    fn scan_prefix<'a>(&'a self, prefix: &[u8]) -> Self::Range<'a> {
        let upper = prefix_successor(prefix);
        self.range(Some(prefix), upper.as_deref())
    }

    /// Persist and release the store
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Smallest key greater than every key starting with `prefix`
///
/// `None` when no such key exists (empty prefix or all 0xFF bytes).
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let i = prefix.iter().rposition(|b| *b != 0xff)?;
    let mut upper = prefix[..i].to_vec();
    upper.push(prefix[i] + 1);
    Some(upper)
}
