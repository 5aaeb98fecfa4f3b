//! Shipment ledger host: runs chaincode invocations against a local SQLite ledger.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shipment_config_and_utils::{
    init_logging, Config, LogConfig, Paths, LEDGER_PATH_ENV, LOG_LEVEL_ENV,
};

/// Shipment ledger command-line interface.
#[derive(Parser)]
#[command(name = "shipment-ledger")]
#[command(about = "Register, update and audit shipments in a local versioned ledger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = LOG_LEVEL_ENV)]
    log_level: Option<String>,

    /// Base directory for config, ledger and logs. Defaults to ~/.shipment-ledger
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Ledger file to use instead of the configured one
    #[arg(long, global = true, env = LEDGER_PATH_ENV)]
    ledger: Option<PathBuf>,

    /// Pretty-print JSON payloads
    #[arg(long, global = true)]
    pretty: bool,

    /// Mirror logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a chaincode operation, e.g. `invoke getShipmentDetails S1`
    Invoke {
        /// Operation name
        function: String,
        /// Positional arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run the instantiation hook (no arguments, or ten to seed a shipment)
    Init {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration (flags and environment included) to the config file
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let mut config = Config::load(&paths).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(ledger) = cli.ledger {
        config.ledger_path = Some(ledger);
    }

    init_logging(&LogConfig {
        service_name: "shipment-ledger".into(),
        default_level: config.log_level.clone(),
        log_path: paths.log_file(),
        also_stderr: cli.verbose,
    })
    .context("failed to initialize logging")?;

    let ledger_file = config.ledger_file(&paths);
    let output = match cli.command {
        Commands::Invoke { function, args } => {
            commands::invoke(&ledger_file, &function, &args, cli.pretty)?
        }
        Commands::Init { args } => commands::init(&ledger_file, &args)?,
        Commands::Config {
            command: ConfigCommand::Show,
        } => Some(commands::show_config(&config, &paths)?),
        Commands::Config {
            command: ConfigCommand::Init,
        } => Some(commands::save_config(&config, &paths)?),
    };

    if let Some(output) = output {
        println!("{output}");
    }
    Ok(())
}
