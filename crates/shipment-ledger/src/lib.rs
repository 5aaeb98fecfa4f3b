//! # Shipment Ledger
//!
//! The ledger capability consumed by the shipment chaincode: a versioned,
//! key-addressed store that keeps every historical write to a key.
//!
//! ## Capability
//!
//! | Primitive | Trait method |
//! |-----------|--------------|
//! | Point read | [`Ledger::get_state`] |
//! | Point write | [`Ledger::put_state`] |
//! | Existence check | [`Ledger::has_state`] |
//! | Ordered write history | [`Ledger::history_for_key`] |
//!
//! History iterators hand out [`KeyModification`]s oldest first and must be
//! released with [`HistoryIterator::close`] once the caller is done.
//!
//! ## Backends
//!
//! - [`MemoryLedger`] - in-process store, used by tests and embedding hosts
//! - [`SqliteLedger`] - durable store backed by a single SQLite file
//!
//! Both backends also expose a host-side `delete_state`, which the chaincode
//! never calls; deletions only become visible to it as delete markers in
//! history.
//!
//! ## Example
//!
//! ```rust
//! use shipment_ledger::{Ledger, MemoryLedger};
//!
//! let ledger = MemoryLedger::new();
//! ledger.put_state("S1", br#"{"ShipmentId":"S1"}"#).unwrap();
//! assert!(ledger.has_state("S1").unwrap());
//!
//! let history: Vec<_> = ledger
//!     .history_for_key("S1")
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(history.len(), 1);
//! ```

mod memory;
mod sqlite;
mod traits;
mod types;

pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;
pub use traits::{HistoryIterator, Ledger};
pub use types::{KeyModification, Timestamp};

use thiserror::Error;

/// Errors reported by a ledger backend.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Keys must be non-empty.
    #[error("ledger keys must not be empty")]
    EmptyKey,

    /// A concurrent writer holds the key; the write was not applied.
    #[error("write conflict on key: {0}")]
    Conflict(String),

    /// The history iterator was read after being closed.
    #[error("history iterator already closed")]
    IteratorClosed,

    /// Backend-specific failure.
    #[error("ledger backend error: {0}")]
    Backend(String),
}

/// Result type alias using LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

pub(crate) fn validate_key(key: &str) -> LedgerResult<()> {
    if key.is_empty() {
        return Err(LedgerError::EmptyKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_conflict() {
        let err = LedgerError::Conflict("S1".into());
        assert_eq!(err.to_string(), "write conflict on key: S1");
    }

    #[test]
    fn validate_key_rejects_empty() {
        assert!(matches!(validate_key(""), Err(LedgerError::EmptyKey)));
        assert!(validate_key("S1").is_ok());
    }
}
