//! Core types for the ledger capability.

use chrono::{DateTime, Utc};

/// Commit timestamp as delivered by the ledger (seconds + nanoseconds since
/// the Unix epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    /// Creates a timestamp from a seconds/nanoseconds pair.
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Returns the current wall-clock time.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Converts to a UTC datetime, `None` if out of range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        }
    }
}

/// One historical write (or delete) to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    /// Identifier of the transaction that made the write.
    pub tx_id: String,
    /// Value written; empty for deletes.
    pub value: Vec<u8>,
    /// Whether this write deleted the key.
    pub is_delete: bool,
    /// Commit timestamp.
    pub timestamp: Timestamp,
}

impl KeyModification {
    /// A write of `value` committed by `tx_id` at `timestamp`.
    pub fn write(tx_id: impl Into<String>, value: Vec<u8>, timestamp: Timestamp) -> Self {
        Self {
            tx_id: tx_id.into(),
            value,
            is_delete: false,
            timestamp,
        }
    }

    /// A delete committed by `tx_id` at `timestamp`.
    pub fn delete(tx_id: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            tx_id: tx_id.into(),
            value: Vec::new(),
            is_delete: true,
            timestamp,
        }
    }
}

pub(crate) fn new_tx_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
