//! hwinfo CLI entry point
//!
//! Parses arguments, loads configuration, initializes logging and
//! dispatches to the subcommand handlers. Errors are printed to stderr
//! and mapped to exit codes by [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use hwinfo_core::config::{GeneralConfig, HwinfoConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 설정 오류도 로그 초기화 이후에 보고되도록 기본값으로 대체
    let config = HwinfoConfig::load_or_default(&cli.config).await;
    let general = config
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_else(|_| GeneralConfig::default());
    logging::init_tracing(&general, cli.log_level.as_deref())?;

    tracing::debug!(config = %cli.config.display(), "hwinfo starting");

    if let Err(e) = run(cli, config).await {
        tracing::debug!(error = %e, exit_code = e.exit_code(), "command failed");
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(
    cli: Cli,
    config: Result<HwinfoConfig, hwinfo_core::error::HwinfoError>,
) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Inspect(args) => commands::inspect::execute(args, config?, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
