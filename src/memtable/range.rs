//! Range cursor over a MemTable
//!
//! Holds no lock between steps. Every `next()` takes the read lock, looks up
//! the first key past the cursor, and releases the lock before returning.
//! Concurrent writes may or may not show up in a running range, but keys are
//! always yielded in strictly ascending order and values are never torn.

use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::ops::Bound;

use bytes::Bytes;
use parking_lot::RwLock;

use crate::record::Record;

/// Lazy ascending view over a key range
///
/// Cloning a `Range` gives an independent cursor starting from the same
/// position, so a fresh clone taken before iterating restarts the view.
#[derive(Clone)]
pub struct Range<'a> {
    data: &'a RwLock<BTreeMap<Bytes, Bytes>>,
    /// Next key must satisfy this; advances to `Excluded(last)` as we go
    lower: Bound<Bytes>,
    upper: Bound<Bytes>,
    done: bool,
}

impl<'a> Range<'a> {
    pub(super) fn new(
        data: &'a RwLock<BTreeMap<Bytes, Bytes>>,
        lower: Bound<Bytes>,
        upper: Bound<Bytes>,
    ) -> Self {
        let mut range = Self {
            data,
            lower,
            upper,
            done: false,
        };
        range.done = range.bounds_empty();
        range
    }

    /// True when no key can satisfy both bounds.
    /// `BTreeMap::range` panics on inverted bounds, so this is checked first.
    fn bounds_empty(&self) -> bool {
        use Bound::*;

        match (&self.lower, &self.upper) {
            (Included(lo), Included(hi)) => lo > hi,
            (Included(lo), Excluded(hi)) | (Excluded(lo), Included(hi)) => lo >= hi,
            (Excluded(lo), Excluded(hi)) => lo >= hi,
            _ => false,
        }
    }
}

impl Iterator for Range<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let bounds = (as_slice_bound(&self.lower), as_slice_bound(&self.upper));
        let next = {
            let data = self.data.read();
            data.range::<[u8], _>(bounds)
                .next()
                .map(|(k, v)| (k.clone(), v.clone()))
        };

        match next {
            Some((key, value)) => {
                self.lower = Bound::Excluded(key.clone());
                self.done = self.bounds_empty();
                Some(Record::new(key, Some(value)))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for Range<'_> {}

fn as_slice_bound(bound: &Bound<Bytes>) -> Bound<&[u8]> {
    match bound {
        Bound::Included(k) => Bound::Included(k.as_ref()),
        Bound::Excluded(k) => Bound::Excluded(k.as_ref()),
        Bound::Unbounded => Bound::Unbounded,
    }
}
