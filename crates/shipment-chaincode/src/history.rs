//! History formatter: renders a key's write history as a JSON audit trail.
//!
//! Output is a single JSON array, oldest write first:
//!
//! ```text
//! [{"TxId":"…","Value":{…record…},"Timestamp":"2024-03-01 09:30:00.25 +0000 UTC","IsDelete":"false"},
//!  {"TxId":"…","Value":null,"Timestamp":"…","IsDelete":"true"}]
//! ```

use serde::Serialize;
use serde_json::value::RawValue;
use shipment_ledger::{HistoryIterator, KeyModification, Ledger, LedgerResult, Timestamp};
use tracing::{debug, warn};

use crate::error::{ChaincodeError, ChaincodeResult};
use crate::manager::require_id;

#[derive(Debug, Serialize)]
struct HistoryEntry {
    #[serde(rename = "TxId")]
    tx_id: String,
    #[serde(rename = "Value")]
    value: Option<Box<RawValue>>,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "IsDelete")]
    is_delete: String,
}

impl TryFrom<KeyModification> for HistoryEntry {
    type Error = ChaincodeError;

    fn try_from(m: KeyModification) -> Result<Self, Self::Error> {
        // Stored values are already JSON; embed them as-is.
        let value = if m.is_delete {
            None
        } else {
            Some(serde_json::from_slice::<Box<RawValue>>(&m.value)?)
        };
        Ok(Self {
            tx_id: m.tx_id,
            value,
            timestamp: render_timestamp(m.timestamp)?,
            is_delete: m.is_delete.to_string(),
        })
    }
}

/// Owns an open history iterator and closes it when dropped.
struct HistoryScope<'a> {
    key: String,
    inner: Box<dyn HistoryIterator + 'a>,
}

impl<'a> HistoryScope<'a> {
    fn open<L: Ledger + ?Sized>(ledger: &'a L, key: &str) -> ChaincodeResult<Self> {
        let inner = ledger
            .history_for_key(key)
            .map_err(|e| ChaincodeError::storage("Failed to open shipment history", e))?;
        Ok(Self {
            key: key.to_string(),
            inner,
        })
    }
}

impl Iterator for HistoryScope<'_> {
    type Item = LedgerResult<KeyModification>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl Drop for HistoryScope<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.inner.close() {
            warn!(key = %self.key, error = %err, "failed to close history iterator");
        }
    }
}

/// Renders the full write history of a shipment id.
///
/// An unknown id yields `[]`. Any iteration failure aborts the whole query.
pub fn query_history<L: Ledger + ?Sized>(ledger: &L, args: &[&str]) -> ChaincodeResult<Vec<u8>> {
    let [id] = args else {
        return Err(ChaincodeError::argument_count("1", args.len()));
    };
    let id = require_id(id)?;
    debug!(shipment_id = id, "querying shipment history");

    let mut entries = Vec::new();
    for modification in HistoryScope::open(ledger, id)? {
        let modification = modification
            .map_err(|e| ChaincodeError::storage("Failed to read shipment history", e))?;
        entries.push(HistoryEntry::try_from(modification)?);
    }

    debug!(shipment_id = id, entries = entries.len(), "history collected");
    Ok(serde_json::to_vec(&entries)?)
}

/// Formats a commit timestamp as `YYYY-MM-DD HH:MM:SS[.fraction] +0000 UTC`,
/// trimming trailing zeros from the fraction.
pub fn render_timestamp(ts: Timestamp) -> ChaincodeResult<String> {
    let dt = ts.to_datetime().ok_or_else(|| {
        ChaincodeError::Serialization(format!(
            "commit timestamp out of range: {}s {}ns",
            ts.seconds, ts.nanos
        ))
    })?;

    let mut rendered = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = dt.timestamp_subsec_nanos();
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        rendered.push('.');
        rendered.push_str(fraction.trim_end_matches('0'));
    }
    rendered.push_str(" +0000 UTC");
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_whole_seconds_without_fraction() {
        let rendered = render_timestamp(Timestamp::new(1_709_285_400, 0)).unwrap();
        assert_eq!(rendered, "2024-03-01 09:30:00 +0000 UTC");
    }

    #[test]
    fn renders_trimmed_fraction() {
        let rendered = render_timestamp(Timestamp::new(1_709_285_400, 250_000_000)).unwrap();
        assert_eq!(rendered, "2024-03-01 09:30:00.25 +0000 UTC");

        let rendered = render_timestamp(Timestamp::new(0, 1)).unwrap();
        assert_eq!(rendered, "1970-01-01 00:00:00.000000001 +0000 UTC");
    }

    #[test]
    fn out_of_range_timestamp_is_an_error() {
        let err = render_timestamp(Timestamp::new(i64::MAX, 0)).unwrap_err();
        assert!(matches!(err, ChaincodeError::Serialization(_)));
    }

    #[test]
    fn delete_entry_has_null_value() {
        let entry =
            HistoryEntry::try_from(KeyModification::delete("tx9", Timestamp::new(0, 0))).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"TxId":"tx9","Value":null,"Timestamp":"1970-01-01 00:00:00 +0000 UTC","IsDelete":"true"}"#
        );
    }

    #[test]
    fn write_entry_embeds_stored_json_verbatim() {
        let stored = br#"{"docType":"Shipment","ShipmentId":"S1"}"#.to_vec();
        let entry =
            HistoryEntry::try_from(KeyModification::write("tx1", stored, Timestamp::new(0, 0)))
                .unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""Value":{"docType":"Shipment","ShipmentId":"S1"}"#));
        assert!(json.contains(r#""IsDelete":"false""#));
    }

    #[test]
    fn non_json_value_is_a_serialization_error() {
        let entry = HistoryEntry::try_from(KeyModification::write(
            "tx1",
            b"not json".to_vec(),
            Timestamp::new(0, 0),
        ));
        assert!(matches!(entry, Err(ChaincodeError::Serialization(_))));
    }
}
