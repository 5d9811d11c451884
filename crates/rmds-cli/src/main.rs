//! RMDS CLI - scenario NPVs from curve, instrument and security definitions.
//!
//! # Usage
//!
//! ```bash
//! # Run a valuation
//! rmds run demos/config.json
//!
//! # Evaluate a curve at offsets or dates
//! rmds curve --file demos/curves.csv --name OIS.USD --date 2020-12-30 --at 90,2021-12-31
//!
//! # Bootstrap curves from quoted instruments
//! rmds bootstrap --file demos/instruments.csv --date 2020-12-30
//! ```
//!
//! Logs go to stderr (or `--log-file`) and honour `RUST_LOG`.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use error::CliError;

fn init_logging(log_file: Option<&Path>, quiet: bool) -> Result<()> {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_file.as_deref(), cli.quiet)?;

    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, format, quiet)?,
        Commands::Curve(args) => commands::curve::execute(args, format, quiet)?,
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, format, quiet)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<CliError>() {
                Some(cli_error) => format!("[{}] {cli_error}", cli_error.kind()),
                None => format!("{e:#}"),
            };
            output::print_error(&message);
            ExitCode::FAILURE
        }
    }
}
