//! In-process ledger backend.
//!
//! Keeps the full modification log per key behind a single lock. The current
//! value of a key is its latest modification unless that one is a delete.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::traits::{HistoryIterator, Ledger};
use crate::types::{new_tx_id, KeyModification, Timestamp};
use crate::{validate_key, LedgerError, LedgerResult};

/// A versioned in-memory ledger.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    keys: Mutex<HashMap<String, Vec<KeyModification>>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes `key`, appending a delete marker to its history.
    ///
    /// Returns false if the key held no value.
    pub fn delete_state(&self, key: &str) -> LedgerResult<bool> {
        validate_key(key)?;
        let mut keys = self.keys.lock();
        let Some(log) = keys.get_mut(key) else {
            return Ok(false);
        };
        if log.last().map_or(true, |m| m.is_delete) {
            return Ok(false);
        }
        log.push(KeyModification::delete(new_tx_id(), Timestamp::now()));
        tracing::debug!(key, "memory ledger: key deleted");
        Ok(true)
    }
}

impl Ledger for MemoryLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let keys = self.keys.lock();
        Ok(keys
            .get(key)
            .and_then(|log| log.last())
            .filter(|m| !m.is_delete)
            .map(|m| m.value.clone()))
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        validate_key(key)?;
        let modification = KeyModification::write(new_tx_id(), value.to_vec(), Timestamp::now());
        tracing::debug!(key, tx_id = %modification.tx_id, "memory ledger: put state");
        self.keys
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(modification);
        Ok(())
    }

    fn history_for_key(&self, key: &str) -> LedgerResult<Box<dyn HistoryIterator + '_>> {
        validate_key(key)?;
        let snapshot = self.keys.lock().get(key).cloned().unwrap_or_default();
        Ok(Box::new(SnapshotHistory::new(snapshot)))
    }
}

/// History iterator over a point-in-time copy of a key's modification log.
pub(crate) struct SnapshotHistory {
    entries: std::vec::IntoIter<KeyModification>,
    closed: bool,
}

impl SnapshotHistory {
    pub(crate) fn new(entries: Vec<KeyModification>) -> Self {
        Self {
            entries: entries.into_iter(),
            closed: false,
        }
    }
}

impl Iterator for SnapshotHistory {
    type Item = LedgerResult<KeyModification>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.entries.next().map(Ok)
    }
}

impl HistoryIterator for SnapshotHistory {
    fn close(&mut self) -> LedgerResult<()> {
        if self.closed {
            return Err(LedgerError::IteratorClosed);
        }
        self.closed = true;
        Ok(())
    }
}
