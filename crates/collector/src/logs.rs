//! Collected log directory source.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use hwinfo_core::config::LogsConfig;
use hwinfo_core::error::{CollectError, HwinfoError};

use crate::source::{DataSource, InfoSource};

/// Reads information from a directory of previously collected command outputs.
///
/// Each file is located by exact file name anywhere below the root directory.
/// Paths containing the configured exclude marker (for example `/crash/`) are
/// skipped, and a name found more than once is reported as ambiguous. The
/// marker is matched against the path below the root, so a root that itself
/// lives under `/var/crash/` is searched normally.
#[derive(Debug, Clone)]
pub struct LogDirSource {
    root: PathBuf,
    logs: LogsConfig,
}

impl LogDirSource {
    pub fn new(root: impl Into<PathBuf>, logs: LogsConfig) -> Self {
        Self {
            root: root.into(),
            logs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the single file called `name` below the root directory.
    pub fn find(&self, name: &str) -> Result<PathBuf, CollectError> {
        find_file(&self.root, name, &self.logs.exclude_marker)
    }
}

impl DataSource for LogDirSource {
    fn kind(&self) -> &'static str {
        "logs"
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, source: InfoSource) -> Result<String, HwinfoError> {
        let name = source.log_name(&self.logs).to_owned();
        let root = self.root.clone();
        let marker = self.logs.exclude_marker.clone();

        let path = tokio::task::spawn_blocking(move || find_file(&root, &name, &marker))
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))??;

        debug!(path = %path.display(), %source, "reading log file");
        let bytes = tokio::fs::read(&path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn find_file(root: &Path, name: &str, exclude_marker: &str) -> Result<PathBuf, CollectError> {
    let mut matches: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(|entry| entry.into_path())
        .filter(|path| !is_excluded(root, path, exclude_marker))
        .collect();

    match matches.len() {
        0 => Err(CollectError::FileNotFound {
            name: name.to_owned(),
            location: root.display().to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => {
            matches.sort();
            Err(CollectError::AmbiguousMatch {
                name: name.to_owned(),
                matches: matches
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
            })
        }
    }
}

fn is_excluded(root: &Path, path: &Path, exclude_marker: &str) -> bool {
    if exclude_marker.is_empty() {
        return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    format!("/{}", relative.to_string_lossy()).contains(exclude_marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn finds_file_in_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bugtool/host-01/cpuinfo", "processor : 0\n");

        let source = LogDirSource::new(dir.path(), LogsConfig::default());
        let text = source.fetch(InfoSource::Cpuinfo).await.unwrap();
        assert_eq!(text, "processor : 0\n");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lspci-vv.out", "");

        let source = LogDirSource::new(dir.path(), LogsConfig::default());
        let err = source.fetch(InfoSource::Lspci).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("lspci-nnm.out"));
    }

    #[tokio::test]
    async fn duplicate_names_are_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/dmidecode.out", "one");
        write(dir.path(), "b/dmidecode.out", "two");

        let source = LogDirSource::new(dir.path(), LogsConfig::default());
        let err = source.fetch(InfoSource::Dmidecode).await.unwrap_err();
        match err {
            HwinfoError::Collect(CollectError::AmbiguousMatch { name, matches }) => {
                assert_eq!(name, "dmidecode.out");
                assert_eq!(matches.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn crash_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "host/dmidecode.out", "live");
        write(dir.path(), "host/crash/dmidecode.out", "old");

        let source = LogDirSource::new(dir.path(), LogsConfig::default());
        let text = source.fetch(InfoSource::Dmidecode).await.unwrap();
        assert_eq!(text, "live");
    }

    #[tokio::test]
    async fn root_below_crash_directory_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("var/crash/bugtool-host01");
        write(&root, "cpuinfo", "processor : 0\n");
        write(&root, "crash/cpuinfo", "old");

        let source = LogDirSource::new(&root, LogsConfig::default());
        let text = source.fetch(InfoSource::Cpuinfo).await.unwrap();
        assert_eq!(text, "processor : 0\n");
    }

    #[test]
    fn partial_names_do_not_match() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "old-cpuinfo", "x");

        let source = LogDirSource::new(dir.path(), LogsConfig::default());
        assert!(source.find("cpuinfo").unwrap_err().is_not_found());
    }
}
