//! File system paths for the host.

use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Directory name under the home directory.
const BASE_DIR_NAME: &str = ".shipment-ledger";

/// Manages file system paths for the host.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for config, ledger and logs (~/.shipment-ledger)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.shipment-ledger`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;
        Ok(Self {
            base_dir: home.join(BASE_DIR_NAME),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the config file path (~/.shipment-ledger/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default ledger file path (~/.shipment-ledger/ledger.sqlite).
    pub fn ledger_file(&self) -> PathBuf {
        self.base_dir.join("ledger.sqlite")
    }

    /// Get the logs directory (~/.shipment-ledger/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the JSONL log file path (~/.shipment-ledger/logs/shipment.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("shipment.jsonl")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
