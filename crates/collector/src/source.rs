//! Raw text source abstraction.
//!
//! Every information class the inventory needs ([`InfoSource`]) is fetched as
//! plain text through the [`DataSource`] trait. Production code picks one of the
//! transports in this crate while tests use [`StaticSource`](crate::StaticSource).
//!
//! # Architecture
//!
//! ```text
//!        ┌──────────┐
//!        │ Host<S>  │
//!        └────┬─────┘
//!             │ fetch(InfoSource)
//!             ▼
//!      ┌────────────┐
//!      │ DataSource │ (trait)
//!      └────────────┘
//!     │    │    │    │    │
//!     ▼    ▼    ▼    ▼    ▼
//!  local  ssh  logs  tar  static
//! ```

use std::fmt;
use std::future::Future;

use hwinfo_core::config::{CommandsConfig, LogsConfig};
use hwinfo_core::error::HwinfoError;

/// One class of raw host information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InfoSource {
    /// `lspci -nnmm` machine-readable listing
    Lspci,
    /// `lspci -vv` verbose listing
    LspciVerbose,
    /// `lspci -n` numeric listing
    LspciNumeric,
    /// `dmidecode` BIOS / system tables
    Dmidecode,
    /// `/proc/cpuinfo`
    Cpuinfo,
    /// `biosdevname -d` network interface report
    Biosdevname,
    /// OS inventory key/value file
    OsInventory,
}

impl InfoSource {
    /// All information classes, in preload order.
    pub const ALL: [InfoSource; 7] = [
        Self::Lspci,
        Self::LspciVerbose,
        Self::LspciNumeric,
        Self::Dmidecode,
        Self::Cpuinfo,
        Self::Biosdevname,
        Self::OsInventory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lspci => "lspci",
            Self::LspciVerbose => "lspci_verbose",
            Self::LspciNumeric => "lspci_numeric",
            Self::Dmidecode => "dmidecode",
            Self::Cpuinfo => "cpuinfo",
            Self::Biosdevname => "biosdevname",
            Self::OsInventory => "os_inventory",
        }
    }

    /// Shell command producing this information on a live host.
    pub fn command<'a>(&self, commands: &'a CommandsConfig) -> &'a str {
        match self {
            Self::Lspci => &commands.lspci,
            Self::LspciVerbose => &commands.lspci_verbose,
            Self::LspciNumeric => &commands.lspci_numeric,
            Self::Dmidecode => &commands.dmidecode,
            Self::Cpuinfo => &commands.cpuinfo,
            Self::Biosdevname => &commands.biosdevname,
            Self::OsInventory => &commands.os_inventory,
        }
    }

    /// File name holding this information in a collected log bundle.
    pub fn log_name<'a>(&self, logs: &'a LogsConfig) -> &'a str {
        match self {
            Self::Lspci => &logs.lspci,
            Self::LspciVerbose => &logs.lspci_verbose,
            Self::LspciNumeric => &logs.lspci_numeric,
            Self::Dmidecode => &logs.dmidecode,
            Self::Cpuinfo => &logs.cpuinfo,
            Self::Biosdevname => &logs.biosdevname,
            Self::OsInventory => &logs.os_inventory,
        }
    }
}

impl fmt::Display for InfoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait abstracting where raw host text comes from.
///
/// The trait is `Send + Sync + 'static` so a source can be shared across tasks.
///
/// # Implementations
///
/// - [`LocalSource`](crate::LocalSource): runs commands on this machine
/// - [`SshSource`](crate::SshSource): runs commands on a remote machine
/// - [`LogDirSource`](crate::LogDirSource): reads files from a log directory
/// - [`TarballSource`](crate::TarballSource): reads files from a log archive
/// - [`StaticSource`](crate::StaticSource): returns captured text from memory
///
/// # Error Handling
///
/// A source that looks files up by name reports a missing file as
/// `CollectError::FileNotFound`; [`Host`](crate::Host) treats that as the signal to
/// try an alternative source for the same information.
pub trait DataSource: Send + Sync + 'static {
    /// Short source label (`local`, `ssh`, `logs`, `tarball`, `static`).
    fn kind(&self) -> &'static str;

    /// Human readable description of where text is read from.
    fn location(&self) -> String;

    /// Fetches the raw text for one information class.
    fn fetch(&self, source: InfoSource) -> impl Future<Output = Result<String, HwinfoError>> + Send;
}
