//! Subcommand bodies. Each returns the text to print, if any.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use shipment_chaincode::{Method, Response, ShipmentChaincode};
use shipment_config_and_utils::{Config, Paths};
use shipment_ledger::SqliteLedger;
use tracing::info;

/// How long a call waits for another process holding the ledger's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the ledger file at `path`.
pub fn open_ledger(path: &Path) -> anyhow::Result<SqliteLedger> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let ledger = SqliteLedger::open(path)
        .with_context(|| format!("failed to open ledger {}", path.display()))?;
    ledger.set_busy_timeout(BUSY_TIMEOUT)?;
    Ok(ledger)
}

/// Runs one chaincode call against `ledger`.
///
/// Mutating calls hold the write lock from their first read to their last
/// write, and a failed response rolls back anything they wrote.
pub fn execute(
    ledger: &SqliteLedger,
    read_only: bool,
    call: impl FnOnce(&SqliteLedger) -> Response,
    pretty: bool,
) -> anyhow::Result<Option<String>> {
    if read_only {
        return render(call(ledger), pretty);
    }
    ledger.in_immediate_transaction(|ledger| render(call(ledger), pretty))
}

pub fn invoke(
    ledger_file: &Path,
    function: &str,
    args: &[String],
    pretty: bool,
) -> anyhow::Result<Option<String>> {
    let ledger = open_ledger(ledger_file)?;
    let read_only = function
        .parse::<Method>()
        .is_ok_and(|method| method.is_read_only());
    info!(function, read_only, ledger = %ledger_file.display(), "running invocation");

    let chaincode = ShipmentChaincode::new();
    execute(
        &ledger,
        read_only,
        |ledger| chaincode.invoke(ledger, function, args),
        pretty,
    )
}

pub fn init(ledger_file: &Path, args: &[String]) -> anyhow::Result<Option<String>> {
    let ledger = open_ledger(ledger_file)?;
    let chaincode = ShipmentChaincode::new();
    execute(&ledger, false, |ledger| chaincode.init(ledger, args), false)
}

pub fn show_config(config: &Config, paths: &Paths) -> anyhow::Result<String> {
    let effective = serde_json::json!({
        "log_level": config.log_level,
        "ledger_path": config.ledger_file(paths),
        "base_dir": paths.base_dir(),
        "config_file": paths.config_file(),
        "log_file": paths.log_file(),
    });
    Ok(serde_json::to_string_pretty(&effective)?)
}

/// Writes `config` to the config file, creating the base directory.
pub fn save_config(config: &Config, paths: &Paths) -> anyhow::Result<String> {
    config.save(paths).context("failed to save configuration")?;
    info!(config_file = %paths.config_file().display(), "configuration saved");
    Ok(format!("wrote {}", paths.config_file().display()))
}

/// Turns a failed response into an error and a payload into printable text.
fn render(response: Response, pretty: bool) -> anyhow::Result<Option<String>> {
    if !response.is_success() {
        bail!("{}", response.message);
    }
    let payload = response.payload_bytes();
    if payload.is_empty() {
        return Ok(None);
    }
    if pretty {
        let value: serde_json::Value =
            serde_json::from_slice(payload).context("payload is not JSON")?;
        return Ok(Some(serde_json::to_string_pretty(&value)?));
    }
    Ok(Some(String::from_utf8_lossy(payload).into_owned()))
}
