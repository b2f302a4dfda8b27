//! Record type
//!
//! A key paired with an optional value. An absent value is a tombstone: it
//! asks the store to delete the key and is never kept as an entry.

use bytes::Bytes;

/// A key with an optional value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    key: Bytes,
    value: Option<Bytes>,
}

impl Record {
    /// Create a record from a key and an optional value
    pub fn new(key: impl Into<Bytes>, value: Option<Bytes>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// A live key/value pair
    pub fn of(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self::new(key, Some(value.into()))
    }

    /// A deletion request for `key`
    pub fn tombstone(key: impl Into<Bytes>) -> Self {
        Self::new(key, None)
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn value(&self) -> Option<&Bytes> {
        self.value.as_ref()
    }

    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }

    pub fn into_parts(self) -> (Bytes, Option<Bytes>) {
        (self.key, self.value)
    }
}

impl From<(Bytes, Bytes)> for Record {
    fn from((key, value): (Bytes, Bytes)) -> Self {
        Self::new(key, Some(value))
    }
}
