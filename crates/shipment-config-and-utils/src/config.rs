//! Configuration management for the host.

use crate::{CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding `log_level`.
pub const LOG_LEVEL_ENV: &str = "SHIPMENT_LOG_LEVEL";

/// Environment variable overriding `ledger_path`.
pub const LEDGER_PATH_ENV: &str = "SHIPMENT_LEDGER_PATH";

/// Host configuration, stored as `config.json` under the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Ledger file to open instead of `<base>/ledger.sqlite`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            ledger_path: None,
        }
    }
}

impl Config {
    /// Load configuration from `config.json`, falling back to defaults,
    /// then apply environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    /// The ledger file to open: the configured override, else the default location.
    pub fn ledger_file(&self, paths: &Paths) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(|| paths.ledger_file())
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`; empty values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(log_level) = non_empty(LOG_LEVEL_ENV) {
            self.log_level = log_level;
        }
        if let Some(ledger_path) = non_empty(LEDGER_PATH_ENV) {
            self.ledger_path = Some(PathBuf::from(ledger_path));
        }
    }
}
