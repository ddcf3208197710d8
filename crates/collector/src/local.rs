//! Local command execution.

use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use hwinfo_core::config::CommandsConfig;
use hwinfo_core::error::{CollectError, HwinfoError};

use crate::source::{DataSource, InfoSource};

/// Runs the configured commands on this machine through `sh -c`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    commands: CommandsConfig,
    timeout: Duration,
}

impl LocalSource {
    pub fn new(commands: CommandsConfig, timeout: Duration) -> Self {
        Self { commands, timeout }
    }

    /// Uses `commands.timeout_secs` as the per-command timeout.
    pub fn from_config(commands: CommandsConfig) -> Self {
        let timeout = Duration::from_secs(commands.timeout_secs);
        Self::new(commands, timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn commands(&self) -> &CommandsConfig {
        &self.commands
    }
}

impl DataSource for LocalSource {
    fn kind(&self) -> &'static str {
        "local"
    }

    fn location(&self) -> String {
        "localhost".to_owned()
    }

    async fn fetch(&self, source: InfoSource) -> Result<String, HwinfoError> {
        let command_line = source.command(&self.commands);
        let mut command = Command::new("sh");
        command.arg("-c").arg(command_line);

        let output = run(&mut command, command_line, "localhost", self.timeout).await?;
        if !output.status.success() {
            return Err(command_failed(command_line, &output).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Spawns `command`, waits at most `timeout` and collects its output.
///
/// The child is killed when the timeout elapses.
pub(crate) async fn run(
    command: &mut Command,
    label: &str,
    target: &str,
    timeout: Duration,
) -> Result<Output, CollectError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(command = label, target, "running command");
    let child = command.spawn().map_err(|e| CollectError::Spawn {
        command: label.to_owned(),
        reason: e.to_string(),
    })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(CollectError::Spawn {
            command: label.to_owned(),
            reason: e.to_string(),
        }),
        Err(_) => Err(CollectError::Timeout {
            target: format!("'{label}' on {target}"),
            secs: timeout.as_secs(),
        }),
    }
}

/// Builds a `CommandFailed` error from a finished process.
///
/// A process killed by a signal has no exit code and reports status -1.
pub(crate) fn command_failed(label: &str, output: &Output) -> CollectError {
    CollectError::CommandFailed {
        command: label.to_owned(),
        status: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
    }
}
