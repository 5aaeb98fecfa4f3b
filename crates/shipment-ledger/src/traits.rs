//! Ledger capability traits.

use crate::types::KeyModification;
use crate::LedgerResult;

/// An ordered cursor over every write ever made to one key.
///
/// Entries come out oldest first, in commit order. Callers must call
/// [`close`](HistoryIterator::close) when finished, on every exit path.
pub trait HistoryIterator: Iterator<Item = LedgerResult<KeyModification>> {
    /// Release the iterator. Reading after close yields nothing.
    fn close(&mut self) -> LedgerResult<()>;
}

/// A versioned key-value ledger that retains every historical write per key.
///
/// Implementations own their consistency discipline: a write that conflicts
/// with a concurrent writer must fail with
/// [`LedgerError::Conflict`](crate::LedgerError::Conflict) rather than be
/// silently merged.
pub trait Ledger {
    /// Read the current value for `key`, `None` if absent or deleted.
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Replace the whole value stored under `key`.
    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Check whether `key` currently holds a value.
    fn has_state(&self, key: &str) -> LedgerResult<bool> {
        Ok(self.get_state(key)?.is_some())
    }

    /// Open the write history of `key`.
    fn history_for_key(&self, key: &str) -> LedgerResult<Box<dyn HistoryIterator + '_>>;
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        (**self).get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        (**self).put_state(key, value)
    }

    fn has_state(&self, key: &str) -> LedgerResult<bool> {
        (**self).has_state(key)
    }

    fn history_for_key(&self, key: &str) -> LedgerResult<Box<dyn HistoryIterator + '_>> {
        (**self).history_for_key(key)
    }
}
