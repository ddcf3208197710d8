//! CLI-specific error types and exit code mapping

use hwinfo_core::error::{CollectError, ExtractError, HwinfoError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed (bad arguments, unknown section).
    #[error("{0}")]
    Command(String),

    /// Raw text did not match the expected layout.
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Running a command, reaching a remote host or finding a log file failed.
    #[error("collect error: {0}")]
    Collect(#[from] CollectError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                   |
    /// |------|-------------------------------------------|
    /// | 0    | Success                                   |
    /// | 1    | Command / extraction error                |
    /// | 2    | Configuration error                       |
    /// | 3    | Collection error (command, SSH, file lookup) |
    /// | 10   | IO error                                  |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Collect(_) => 3,
            Self::Io(_) => 10,
            Self::Command(_) | Self::Extract(_) | Self::JsonSerialize(_) => 1,
        }
    }
}

impl From<HwinfoError> for CliError {
    fn from(e: HwinfoError) -> Self {
        match e {
            HwinfoError::Config(e) => Self::Config(e.to_string()),
            HwinfoError::Extract(e) => Self::Extract(e),
            HwinfoError::Collect(e) => Self::Collect(e),
            HwinfoError::Io(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwinfo_core::error::ConfigError;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_collect_error() {
        let err = CliError::Collect(CollectError::Timeout {
            target: "db-01".to_owned(),
            secs: 10,
        });
        assert_eq!(err.exit_code(), 3, "collect error should return exit code 3");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_and_extract_errors() {
        assert_eq!(CliError::Command("bad".to_owned()).exit_code(), 1);
        let extract = CliError::Extract(ExtractError::Validation {
            set: "lspci_nnmm".to_owned(),
            item: 0,
            missing: vec!["pci_device_bus_id".to_owned()],
        });
        assert_eq!(extract.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_from_hwinfo_error_keeps_category() {
        let config: CliError = HwinfoError::Config(ConfigError::ParseFailed {
            reason: "expected '='".to_owned(),
        })
        .into();
        assert_eq!(config.exit_code(), 2);
        assert!(config.to_string().contains("expected '='"));

        let collect: CliError = HwinfoError::Collect(CollectError::FileNotFound {
            name: "cpuinfo".to_owned(),
            location: "/tmp/logs".to_owned(),
        })
        .into();
        assert_eq!(collect.exit_code(), 3);

        let io: CliError =
            HwinfoError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")).into();
        assert_eq!(io.exit_code(), 10);
    }

    #[test]
    fn test_error_display_command() {
        let err = CliError::Command("execution failed".to_owned());
        assert_eq!(format!("{}", err), "execution failed");
    }
}
