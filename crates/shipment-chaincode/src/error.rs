//! Error types for chaincode invocations.

use shipment_ledger::LedgerError;
use thiserror::Error;

/// Errors that terminate a chaincode invocation.
///
/// None of these are retried; each surfaces as a single failed [`Response`](crate::Response).
#[derive(Debug, Error)]
pub enum ChaincodeError {
    /// Register was called for an id that already holds a value.
    #[error("This shipment already exists: {0}")]
    AlreadyExists(String),

    /// No value is stored under the id.
    #[error("shipment does not exist: {0}")]
    NotFound(String),

    /// Wrong argument count or an unusable argument.
    #[error("{0}")]
    MalformedArguments(String),

    /// The record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The ledger failed a read, write or history iteration.
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: LedgerError,
    },

    /// The dispatcher does not know the operation name.
    #[error("Received unknown function invocation: {0}")]
    UnknownOperation(String),
}

impl ChaincodeError {
    /// Wrong number of positional arguments.
    pub fn argument_count(expected: &str, actual: usize) -> Self {
        Self::MalformedArguments(format!(
            "Incorrect number of arguments. Expecting {expected}, got {actual}"
        ))
    }

    /// Wrap a ledger failure with what the chaincode was doing at the time.
    pub fn storage(context: impl Into<String>, source: LedgerError) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ChaincodeError {
    fn from(err: serde_json::Error) -> Self {
        ChaincodeError::Serialization(err.to_string())
    }
}

/// Result type alias using ChaincodeError.
pub type ChaincodeResult<T> = Result<T, ChaincodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_already_exists() {
        let err = ChaincodeError::AlreadyExists("S1".into());
        assert_eq!(err.to_string(), "This shipment already exists: S1");
    }

    #[test]
    fn display_argument_count() {
        let err = ChaincodeError::argument_count("2", 1);
        assert_eq!(
            err.to_string(),
            "Incorrect number of arguments. Expecting 2, got 1"
        );
    }

    #[test]
    fn storage_keeps_context_and_source() {
        let err = ChaincodeError::storage(
            "Failed to get shipment details",
            LedgerError::Backend("disk on fire".into()),
        );
        assert_eq!(
            err.to_string(),
            "Failed to get shipment details: ledger backend error: disk on fire"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ChaincodeError = serde_err.into();
        assert!(matches!(err, ChaincodeError::Serialization(_)));
    }
}
