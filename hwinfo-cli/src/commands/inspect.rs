//! `hwinfo inspect` command handler

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use hwinfo_collector::{DataSource, Host, LocalSource, LogDirSource, SshSource, TarballSource};
use hwinfo_core::config::HwinfoConfig;
use hwinfo_core::types::{Category, Record};
use hwinfo_parser::{DeviceSummary, PatternCatalog, filter_by_category};

use crate::cli::{InspectArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{OutputWriter, Render, write_table};

/// Host name that selects local collection.
const LOCALHOST: &str = "localhost";

/// CPU table columns.
const CPU_COLUMNS: [&str; 7] = [
    "processor",
    "vendor_id",
    "cpu_family",
    "model",
    "stepping",
    "model_name",
    "cpu_mhz",
];

/// Where the inventory is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local,
    Remote {
        host: String,
        username: String,
        password: Option<String>,
    },
    LogDir(PathBuf),
    Tarball(PathBuf),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str(LOCALHOST),
            Self::Remote { host, username, .. } => write!(f, "{username}@{host}"),
            Self::LogDir(path) | Self::Tarball(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Execute the `inspect` command.
pub async fn execute(
    args: InspectArgs,
    config: HwinfoConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let categories = resolve_categories(&args.filter, &config)?;
    let target = select_target(&args)?;
    let writer = if args.export {
        OutputWriter::new(OutputFormat::Json)
    } else {
        *writer
    };

    info!(%target, categories = ?categories, "collecting inventory");
    let catalog = PatternCatalog::builtin()?;

    let report = match target {
        Target::Local => {
            let source = LocalSource::from_config(config.commands.clone());
            collect(&Host::new(source, catalog), &categories).await?
        }
        Target::Remote {
            host,
            username,
            password,
        } => {
            let mut source = SshSource::new(
                host,
                username,
                config.remote.clone(),
                config.commands.clone(),
            );
            if let Some(password) = password {
                source = source.with_password(password);
            }
            collect(&Host::new(source, catalog), &categories).await?
        }
        Target::LogDir(path) => {
            let source = LogDirSource::new(path, config.logs.clone());
            collect(&Host::new(source, catalog), &categories).await?
        }
        Target::Tarball(path) => {
            let source = TarballSource::open(path, config.logs.clone()).await?;
            collect(&Host::new(source, catalog), &categories).await?
        }
    };

    writer.render(&report)?;
    Ok(())
}

/// Chooses the collection target from the command-line arguments.
///
/// A log path wins over `--machine`; a path containing `.tar` is read as an
/// archive. Any machine other than `localhost` requires a username.
pub fn select_target(args: &InspectArgs) -> Result<Target, CliError> {
    if let Some(path) = &args.logs {
        return Ok(if path.to_string_lossy().contains(".tar") {
            Target::Tarball(path.clone())
        } else {
            Target::LogDir(path.clone())
        });
    }

    if args.machine == LOCALHOST {
        return Ok(Target::Local);
    }

    match &args.username {
        Some(username) if !username.is_empty() => Ok(Target::Remote {
            host: args.machine.clone(),
            username: username.clone(),
            password: args.password.clone(),
        }),
        _ => Err(CliError::Command(
            "you must specify a username to query a remote machine".to_owned(),
        )),
    }
}

/// Categories from `--filter`, falling back to `output.default_filters`.
///
/// Duplicates are dropped; output order is always bios, cpu, nic, storage, gpu.
pub fn resolve_categories(
    filter: &[Category],
    config: &HwinfoConfig,
) -> Result<Vec<Category>, CliError> {
    let requested = if filter.is_empty() {
        config
            .default_categories()
            .map_err(|e| CliError::Config(e.to_string()))?
    } else {
        filter.to_vec()
    };
    Ok(Category::ALL
        .into_iter()
        .filter(|category| requested.contains(category))
        .collect())
}

/// Runs the host queries the categories need.
///
/// PCI devices are listed once and shared by the nic, storage and gpu sections.
pub async fn collect<S: DataSource>(
    host: &Host<S>,
    categories: &[Category],
) -> Result<InventoryReport, CliError> {
    let mut report = InventoryReport::default();

    if categories.contains(&Category::Bios) {
        report.bios = Some(host.get_info().await?);
    }
    if categories.contains(&Category::Cpu) {
        report.cpu = Some(host.get_cpu_info().await?);
    }

    if categories.iter().any(Category::is_pci) {
        let devices = host.get_pci_devices().await?;
        let summaries = |category| {
            filter_by_category(&devices, category)
                .into_iter()
                .map(|device| device.summary())
                .collect::<Vec<_>>()
        };
        if categories.contains(&Category::Nic) {
            report.nics = Some(summaries(Category::Nic));
        }
        if categories.contains(&Category::Storage) {
            report.storage_controllers = Some(summaries(Category::Storage));
        }
        if categories.contains(&Category::Gpu) {
            report.gpus = Some(summaries(Category::Gpu));
        }
    }

    Ok(report)
}

/// Hardware inventory for the requested categories.
///
/// Categories that were not requested are left out of the JSON document.
#[derive(Debug, Default, Serialize)]
pub struct InventoryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bios: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nics: Option<Vec<DeviceSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_controllers: Option<Vec<DeviceSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpus: Option<Vec<DeviceSummary>>,
}

impl Render for InventoryReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let mut first = true;
        let mut section = |w: &mut dyn Write, title: &str| -> std::io::Result<()> {
            use colored::Colorize;
            if !first {
                writeln!(w)?;
            }
            first = false;
            writeln!(w, "{}", title.bold())?;
            writeln!(w)
        };

        if let Some(bios) = &self.bios {
            section(w, "Bios Info:")?;
            write_table(
                w,
                &["Key", "Value"],
                bios.iter().map(|(k, v)| vec![k, v]),
            )?;
        }

        if let Some(cpus) = &self.cpu {
            section(w, "CPU Info:")?;
            write_table(
                w,
                &CPU_COLUMNS,
                cpus.iter().map(|rec| {
                    CPU_COLUMNS
                        .iter()
                        .map(|column| rec.get(column).unwrap_or(""))
                        .collect::<Vec<_>>()
                }),
            )?;
        }

        if let Some(nics) = &self.nics {
            section(w, "Ethernet Controller Info:")?;
            write_devices(w, nics)?;
        }

        if let Some(storage) = &self.storage_controllers {
            section(w, "Storage Controller Info:")?;
            write_devices(w, storage)?;
        }

        if let Some(gpus) = self.gpus.as_ref().filter(|gpus| !gpus.is_empty()) {
            section(w, "GPU Info:")?;
            write_devices(w, gpus)?;
        }

        Ok(())
    }
}

fn write_devices(w: &mut dyn Write, devices: &[DeviceSummary]) -> std::io::Result<()> {
    write_table(
        w,
        &DeviceSummary::COLUMNS,
        devices.iter().map(|device| device.values().to_vec()),
    )
}
