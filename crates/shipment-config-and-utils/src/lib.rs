//! Configuration, file system paths and logging for the shipment ledger host.

mod config;
mod error;
mod json_layer;
mod logging;
mod paths;

pub use config::{Config, DEFAULT_LOG_LEVEL, LEDGER_PATH_ENV, LOG_LEVEL_ENV};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, LogConfig};
pub use paths::Paths;
