//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use hwinfo_core::types::Category;

/// hwinfo -- hardware inventory for live hosts and collected logs.
///
/// Use `hwinfo <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "hwinfo", version, about, long_about = None)]
pub struct Cli {
    /// Path to the hwinfo.toml configuration file.
    #[arg(short, long, default_value = "hwinfo.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect and print the hardware inventory.
    Inspect(InspectArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- inspect ----

/// Query a machine or a collected log bundle.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Categories to query, comma separated (bios, cpu, nic, storage, gpu).
    #[arg(short, long, value_delimiter = ',')]
    pub filter: Vec<Category>,

    /// Remote host address.
    #[arg(short, long, default_value = "localhost")]
    pub machine: String,

    /// Username for the remote host.
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for the remote host (key-based authentication when omitted).
    #[arg(short, long)]
    pub password: Option<String>,

    /// Path to a log directory or a log archive (a path containing `.tar`).
    #[arg(short, long)]
    pub logs: Option<PathBuf>,

    /// Export the result as JSON.
    #[arg(short, long)]
    pub export: bool,
}

// ---- config ----

/// Manage configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only one section (general, remote, commands, logs, output).
        #[arg(long)]
        section: Option<String>,
    },
}
