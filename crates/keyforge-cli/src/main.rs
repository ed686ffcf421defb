#![doc = include_str!("../README.md")]

mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::commands::run;
use cli::config::{AppConfig, CliArgs};
use cli::telemetry::init_telemetry;

fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_telemetry()?;

    let app = AppConfig::try_from(&args)?;
    tracing::debug!(config = ?app.config, "starting");

    let mut stdout = std::io::stdout().lock();
    let outcome = run(&app, &args.command, &mut stdout)?;
    Ok(outcome.into())
}
