//! SQLite ledger backend.
//!
//! Two tables: `world_state` holds the current value per key, `key_history`
//! is the append-only modification log. Every write touches both inside one
//! SQLite transaction, so the log never disagrees with the current state.
//!
//! A read-modify-write must run inside
//! [`SqliteLedger::in_immediate_transaction`]. It takes the write lock before
//! the first read, so a second connection writing the same file in between
//! fails with [`LedgerError::Conflict`] instead of being overwritten.

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Transaction, TransactionBehavior};

use crate::memory::SnapshotHistory;
use crate::traits::{HistoryIterator, Ledger};
use crate::types::{new_tx_id, KeyModification, Timestamp};
use crate::{validate_key, LedgerError, LedgerResult};

/// A durable ledger stored in a single SQLite database.
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    /// Opens a ledger database at the given path.
    ///
    /// Creates the database and schema if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let conn = Connection::open(path)?;
        let ledger = Self { conn };
        ledger.init_schema()?;
        Ok(ledger)
    }

    /// Creates an in-memory ledger database.
    ///
    /// Useful for testing.
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let ledger = Self { conn };
        ledger.init_schema()?;
        Ok(ledger)
    }

    fn init_schema(&self) -> LedgerResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS world_state (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                tx_id TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS key_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL,
                tx_id TEXT NOT NULL,
                value BLOB,
                is_delete INTEGER NOT NULL DEFAULT 0,
                timestamp_seconds INTEGER NOT NULL,
                timestamp_nanos INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_key_history_key ON key_history(key, id);
            "#,
        )?;
        Ok(())
    }

    /// How long to wait on a database locked by another connection before
    /// giving up with [`LedgerError::Conflict`].
    pub fn set_busy_timeout(&self, timeout: Duration) -> LedgerResult<()> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }

    /// Runs `f` inside one `BEGIN IMMEDIATE` transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back otherwise. Writes made by `f`
    /// through this ledger join the transaction. Must not be nested.
    pub fn in_immediate_transaction<T, E>(
        &self,
        f: impl FnOnce(&Self) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<LedgerError>,
    {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
            .map_err(|e| E::from(classify(e)))?;
        let value = f(self)?;
        tx.commit().map_err(|e| E::from(classify(e)))?;
        Ok(value)
    }

    /// Deletes `key`, appending a delete marker to its history.
    ///
    /// Returns false if the key held no value.
    pub fn delete_state(&self, key: &str) -> LedgerResult<bool> {
        validate_key(key)?;
        let deleted = self.write(|conn| {
            let removed = conn
                .execute("DELETE FROM world_state WHERE key = ?", params![key])
                .map_err(classify)?;
            if removed == 0 {
                return Ok(None);
            }
            let marker = KeyModification::delete(new_tx_id(), Timestamp::now());
            append_history(conn, key, &marker)?;
            Ok(Some(marker.tx_id))
        })?;

        match deleted {
            Some(tx_id) => {
                tracing::debug!(key, %tx_id, "sqlite ledger: key deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Applies `f` atomically: inside the caller's transaction when one is
    /// open, else inside a fresh one.
    fn write<T>(&self, f: impl FnOnce(&Connection) -> LedgerResult<T>) -> LedgerResult<T> {
        if !self.conn.is_autocommit() {
            return f(&self.conn);
        }
        let tx = self.conn.unchecked_transaction().map_err(classify)?;
        let value = f(&*tx)?;
        tx.commit().map_err(classify)?;
        Ok(value)
    }
}

impl Ledger for SqliteLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM world_state WHERE key = ?",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(classify)?;
        Ok(value)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        validate_key(key)?;
        let modification = KeyModification::write(new_tx_id(), value.to_vec(), Timestamp::now());

        self.write(|conn| {
            conn.execute(
                "INSERT INTO world_state (key, value, tx_id) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, tx_id = excluded.tx_id",
                params![key, value, modification.tx_id],
            )
            .map_err(classify)?;
            append_history(conn, key, &modification)
        })?;

        tracing::debug!(key, tx_id = %modification.tx_id, "sqlite ledger: put state");
        Ok(())
    }

    fn history_for_key(&self, key: &str) -> LedgerResult<Box<dyn HistoryIterator + '_>> {
        validate_key(key)?;
        let mut stmt = self
            .conn
            .prepare(
                "SELECT tx_id, value, is_delete, timestamp_seconds, timestamp_nanos
                 FROM key_history WHERE key = ? ORDER BY id",
            )
            .map_err(classify)?;
        let rows = stmt
            .query_map(params![key], |row| {
                Ok(KeyModification {
                    tx_id: row.get(0)?,
                    value: row.get::<_, Option<Vec<u8>>>(1)?.unwrap_or_default(),
                    is_delete: row.get::<_, i64>(2)? != 0,
                    timestamp: Timestamp::new(row.get(3)?, row.get(4)?),
                })
            })
            .map_err(classify)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(classify)?);
        }
        Ok(Box::new(SnapshotHistory::new(entries)))
    }
}

fn append_history(conn: &Connection, key: &str, m: &KeyModification) -> LedgerResult<()> {
    let value = if m.is_delete {
        None
    } else {
        Some(m.value.as_slice())
    };
    conn.execute(
        "INSERT INTO key_history (key, tx_id, value, is_delete, timestamp_seconds, timestamp_nanos)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            key,
            m.tx_id,
            value,
            m.is_delete as i64,
            m.timestamp.seconds,
            m.timestamp.nanos
        ],
    )
    .map_err(classify)?;
    Ok(())
}

/// Busy/locked databases mean another writer got there first.
fn classify(err: rusqlite::Error) -> LedgerError {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
            LedgerError::Conflict(err.to_string())
        }
        _ => LedgerError::Sqlite(err),
    }
}
