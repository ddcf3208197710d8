//! Log archive source (`.tar`, `.tar.gz`, `.tgz`, `.tar.bz2`).
//!
//! The compression is detected from the leading magic bytes, not the file
//! extension. xz archives are recognised and rejected with an archive error.
//!
//! Members are matched by path suffix on a component boundary, so
//! `host-01/proc/cpuinfo` matches `cpuinfo` but `old-cpuinfo` does not.
//! Members whose path contains the exclude marker are ignored.
//!
//! With `logs.preload` set, [`TarballSource::open`] reads every configured
//! file in a single archive pass and later fetches are served from memory.
//! Otherwise each fetch scans the archive for the one file it needs.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use bzip2::read::MultiBzDecoder;
use flate2::read::GzDecoder;
use tracing::{debug, info};

use hwinfo_core::config::LogsConfig;
use hwinfo_core::error::{CollectError, HwinfoError};

use crate::source::{DataSource, InfoSource};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];

/// Archive compression, sniffed from the first bytes of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
}

impl Compression {
    fn detect(magic: &[u8]) -> Self {
        if magic.starts_with(GZIP_MAGIC) {
            Self::Gzip
        } else if magic.starts_with(BZIP2_MAGIC) {
            Self::Bzip2
        } else if magic.starts_with(XZ_MAGIC) {
            Self::Xz
        } else {
            Self::None
        }
    }
}

/// One archive member matching a wanted file name.
#[derive(Debug, Clone)]
struct Member {
    path: String,
    contents: String,
}

type Members = HashMap<InfoSource, Vec<Member>>;

/// Reads information from a collected log archive.
#[derive(Debug, Clone)]
pub struct TarballSource {
    path: PathBuf,
    logs: LogsConfig,
    preloaded: Option<Members>,
}

impl TarballSource {
    /// Opens an archive, preloading every configured file when `logs.preload` is set.
    pub async fn open(path: impl Into<PathBuf>, logs: LogsConfig) -> Result<Self, HwinfoError> {
        let path = path.into();
        if !tokio::fs::try_exists(&path).await? {
            return Err(CollectError::Archive {
                path: path.display().to_string(),
                reason: "file does not exist".to_owned(),
            }
            .into());
        }

        let preloaded = if logs.preload {
            let members = scan_blocking(&path, &logs, InfoSource::ALL.to_vec()).await?;
            info!(
                archive = %path.display(),
                sources = members.len(),
                "preloaded log archive"
            );
            Some(members)
        } else {
            None
        };

        Ok(Self {
            path,
            logs,
            preloaded,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_preloaded(&self) -> bool {
        self.preloaded.is_some()
    }

    fn resolve(&self, source: InfoSource, members: Option<&Vec<Member>>) -> Result<String, CollectError> {
        let name = source.log_name(&self.logs);
        match members.map(Vec::as_slice).unwrap_or_default() {
            [] => Err(CollectError::FileNotFound {
                name: name.to_owned(),
                location: self.path.display().to_string(),
            }),
            [only] => {
                debug!(member = %only.path, %source, "using archive member");
                Ok(only.contents.clone())
            }
            many => Err(CollectError::AmbiguousMatch {
                name: name.to_owned(),
                matches: many.iter().map(|m| m.path.clone()).collect(),
            }),
        }
    }
}

impl DataSource for TarballSource {
    fn kind(&self) -> &'static str {
        "tarball"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self, source: InfoSource) -> Result<String, HwinfoError> {
        if let Some(preloaded) = &self.preloaded {
            return Ok(self.resolve(source, preloaded.get(&source))?);
        }
        let members = scan_blocking(&self.path, &self.logs, vec![source]).await?;
        Ok(self.resolve(source, members.get(&source))?)
    }
}

async fn scan_blocking(
    path: &Path,
    logs: &LogsConfig,
    wanted: Vec<InfoSource>,
) -> Result<Members, HwinfoError> {
    let path = path.to_path_buf();
    let wanted: Vec<(InfoSource, String)> = wanted
        .into_iter()
        .map(|source| (source, source.log_name(logs).to_owned()))
        .collect();
    let marker = logs.exclude_marker.clone();

    let members = tokio::task::spawn_blocking(move || scan(&path, &wanted, &marker))
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))??;
    Ok(members)
}

/// Reads the archive once, keeping every member that matches a wanted name.
fn scan(
    path: &Path,
    wanted: &[(InfoSource, String)],
    exclude_marker: &str,
) -> Result<Members, CollectError> {
    let archive_err = |reason: String| CollectError::Archive {
        path: path.display().to_string(),
        reason,
    };

    let mut file = File::open(path).map_err(|e| archive_err(e.to_string()))?;
    let mut magic = Vec::with_capacity(XZ_MAGIC.len());
    (&mut file)
        .take(XZ_MAGIC.len() as u64)
        .read_to_end(&mut magic)
        .map_err(|e| archive_err(e.to_string()))?;
    file.rewind().map_err(|e| archive_err(e.to_string()))?;

    let compression = Compression::detect(&magic);
    debug!(archive = %path.display(), ?compression, "opening log archive");
    let reader: Box<dyn Read> = match compression {
        Compression::None => Box::new(file),
        Compression::Gzip => Box::new(GzDecoder::new(file)),
        Compression::Bzip2 => Box::new(MultiBzDecoder::new(file)),
        Compression::Xz => {
            return Err(archive_err(
                "xz-compressed archives are not supported, decompress with `xz -d` first"
                    .to_owned(),
            ));
        }
    };
    let mut archive = tar::Archive::new(reader);

    let mut members = Members::new();
    let entries = archive.entries().map_err(|e| archive_err(e.to_string()))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| archive_err(e.to_string()))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let member_path = entry
            .path()
            .map_err(|e| archive_err(e.to_string()))?
            .to_string_lossy()
            .into_owned();
        if is_excluded(&member_path, exclude_marker) {
            continue;
        }

        let Some((source, _)) = wanted
            .iter()
            .find(|(_, name)| matches_name(&member_path, name))
        else {
            continue;
        };

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| archive_err(format!("{member_path}: {e}")))?;
        members.entry(*source).or_default().push(Member {
            path: member_path,
            contents: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    Ok(members)
}

/// Member paths are relative, so a leading `/` lets a top-level
/// `crash/` directory match a `/crash/` marker.
fn is_excluded(member_path: &str, exclude_marker: &str) -> bool {
    !exclude_marker.is_empty() && format!("/{member_path}").contains(exclude_marker)
}

fn matches_name(member_path: &str, name: &str) -> bool {
    member_path
        .strip_suffix(name)
        .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('/'))
}
