//! Remote command execution through the OpenSSH client.
//!
//! Commands run as `ssh -o ConnectTimeout=<n> -p <port> user@host <command>`.
//! When a password is given, the client is wrapped in `sshpass -e` and the
//! password travels in the `SSHPASS` environment variable, never on the
//! command line. Without a password the session runs in batch mode so a
//! missing key fails fast instead of prompting.
//!
//! Any stderr output from a successful remote command is reported as
//! `CollectError::RemoteStderr`.

use std::fmt;
use std::time::Duration;

use tokio::process::Command;

use hwinfo_core::config::{CommandsConfig, RemoteConfig};
use hwinfo_core::error::{CollectError, HwinfoError};

use crate::local::{command_failed, run};
use crate::source::{DataSource, InfoSource};

/// Runs the configured commands on a remote host.
#[derive(Clone)]
pub struct SshSource {
    host: String,
    username: String,
    password: Option<String>,
    remote: RemoteConfig,
    commands: CommandsConfig,
}

impl SshSource {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        remote: RemoteConfig,
        commands: CommandsConfig,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: None,
            remote,
            commands,
        }
    }

    /// Authenticates with a password through `sshpass`.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds the client invocation for one remote command.
    pub fn build_command(&self, remote_command: &str) -> Command {
        let mut command = match &self.password {
            Some(password) => {
                let mut command = Command::new("sshpass");
                command
                    .arg("-e")
                    .arg(&self.remote.ssh_program)
                    .env("SSHPASS", password);
                command
            }
            None => {
                let mut command = Command::new(&self.remote.ssh_program);
                command.arg("-o").arg("BatchMode=yes");
                command
            }
        };

        let strict = if self.remote.strict_host_key_checking {
            "yes"
        } else {
            "no"
        };
        command
            .arg("-o")
            .arg(format!("ConnectTimeout={}", self.remote.connect_timeout_secs))
            .arg("-o")
            .arg(format!("StrictHostKeyChecking={strict}"))
            .arg("-o")
            .arg("LogLevel=ERROR")
            .arg("-p")
            .arg(self.remote.port.to_string())
            .arg(format!("{}@{}", self.username, self.host))
            .arg(remote_command);
        command
    }
}

impl fmt::Debug for SshSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshSource")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("port", &self.remote.port)
            .finish()
    }
}

impl DataSource for SshSource {
    fn kind(&self) -> &'static str {
        "ssh"
    }

    fn location(&self) -> String {
        format!("{}@{}:{}", self.username, self.host, self.remote.port)
    }

    async fn fetch(&self, source: InfoSource) -> Result<String, HwinfoError> {
        let remote_command = source.command(&self.commands);
        let mut command = self.build_command(remote_command);
        let timeout = Duration::from_secs(self.remote.command_timeout_secs);

        let output = run(&mut command, remote_command, &self.host, timeout).await?;
        if !output.status.success() {
            return Err(command_failed(remote_command, &output).into());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(CollectError::RemoteStderr {
                host: self.host.clone(),
                stderr: stderr.trim().to_owned(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: &Command) -> Vec<String> {
        command
            .as_std()
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    fn source() -> SshSource {
        SshSource::new(
            "db-01",
            "root",
            RemoteConfig::default(),
            CommandsConfig::default(),
        )
    }

    #[test]
    fn key_based_session_uses_batch_mode() {
        let command = source().build_command("dmidecode");
        assert_eq!(command.as_std().get_program(), "ssh");
        assert_eq!(
            args(&command),
            vec![
                "-o",
                "BatchMode=yes",
                "-o",
                "ConnectTimeout=10",
                "-o",
                "StrictHostKeyChecking=no",
                "-o",
                "LogLevel=ERROR",
                "-p",
                "22",
                "root@db-01",
                "dmidecode",
            ]
        );
    }

    #[test]
    fn password_goes_through_sshpass_environment() {
        let command = source().with_password("s3cret").build_command("lspci -nnmm");
        assert_eq!(command.as_std().get_program(), "sshpass");

        let args = args(&command);
        assert_eq!(&args[..2], &["-e", "ssh"]);
        assert!(!args.iter().any(|arg| arg.contains("s3cret")));
        assert!(!args.iter().any(|arg| arg == "BatchMode=yes"));

        let envs: Vec<_> = command.as_std().get_envs().collect();
        assert!(envs.iter().any(|(key, value)| {
            *key == "SSHPASS" && value.map(|v| v == "s3cret").unwrap_or(false)
        }));
    }

    #[test]
    fn remote_settings_are_applied() {
        let remote = RemoteConfig {
            ssh_program: "/usr/bin/ssh".to_owned(),
            port: 2222,
            connect_timeout_secs: 3,
            strict_host_key_checking: true,
            ..RemoteConfig::default()
        };
        let source = SshSource::new("10.0.0.5", "admin", remote, CommandsConfig::default());
        let command = source.build_command("cat /proc/cpuinfo");
        let args = args(&command);

        assert_eq!(command.as_std().get_program(), "/usr/bin/ssh");
        assert!(args.contains(&"ConnectTimeout=3".to_owned()));
        assert!(args.contains(&"StrictHostKeyChecking=yes".to_owned()));
        assert!(args.windows(2).any(|w| w == ["-p", "2222"]));
        assert_eq!(args.last().map(String::as_str), Some("cat /proc/cpuinfo"));
        assert_eq!(source.location(), "admin@10.0.0.5:2222");
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", source().with_password("s3cret"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("***"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_client_binary_is_a_spawn_error() {
        let remote = RemoteConfig {
            ssh_program: "/nonexistent/hwinfo-ssh".to_owned(),
            command_timeout_secs: 5,
            ..RemoteConfig::default()
        };
        let source = SshSource::new("db-01", "root", remote, CommandsConfig::default());
        let err = source.fetch(InfoSource::Dmidecode).await.unwrap_err();
        assert!(matches!(err, HwinfoError::Collect(CollectError::Spawn { .. })));
    }
}
