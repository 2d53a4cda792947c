//! LogStore - durable read/write of exactly one host's log file
//!
//! # Layout
//!
//! | File | Owner | Content |
//! |------|-------|---------|
//! | `<shared>/.tags-<host>.json` | `<host>` | `HostLog` (version, host, tag_log, file_tag_log) |
//!
//! # Durability
//!
//! The log is semantically append-only but rewritten in full on every save:
//! the new content goes to a temporary file in the same folder, is fsynced,
//! then renamed over the old file. A crash leaves either the old or the new
//! log, never a truncated one.
//!
//! No business validation happens here.

use shared::tag::{HostLog, LOG_FORMAT_VERSION, log_file_name};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No shared folder is open")]
    NoSharedFolder,

    #[error("Shared folder unavailable: {}", .0.display())]
    FolderUnavailable(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed log {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported log version {version} in {}", .path.display())]
    UnsupportedVersion { path: PathBuf, version: u32 },

    #[error("Log {} belongs to host {found:?}, not {expected:?}", .path.display())]
    HostMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// The file exists but its content cannot be used
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            StorageError::Malformed { .. } | StorageError::UnsupportedVersion { .. }
        )
    }

    fn io(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Log file of one host
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
    host: String,
}

impl LogStore {
    /// Store for `host` inside `folder`, using the deterministic file name
    pub fn for_host(folder: &Path, host: &str) -> Self {
        Self {
            path: folder.join(log_file_name(host)),
            host: host.to_string(),
        }
    }

    /// Store for an already discovered log file
    pub fn at(path: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            host: host.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the log; a missing file is an empty log (first use)
    pub fn load(&self) -> StorageResult<HostLog> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(HostLog::new(self.host.clone()));
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let log: HostLog =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        if log.version > LOG_FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                path: self.path.clone(),
                version: log.version,
            });
        }

        Ok(log)
    }

    /// Load the log this store's host owns
    ///
    /// A document written by a different host is rejected so it is never
    /// appended to and saved back under this host's name.
    pub fn load_own(&self) -> StorageResult<HostLog> {
        let log = self.load()?;
        if log.host != self.host {
            return Err(StorageError::HostMismatch {
                path: self.path.clone(),
                expected: self.host.clone(),
                found: log.host,
            });
        }
        Ok(log)
    }

    /// Replace the log file atomically with `log`
    pub fn save(&self, log: &HostLog) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if dir.is_dir() => dir,
            Some(dir) => return Err(StorageError::FolderUnavailable(dir.to_path_buf())),
            None => return Err(StorageError::FolderUnavailable(self.path.clone())),
        };

        let json = serde_json::to_vec_pretty(log)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        tmp.write_all(&json)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            tag_entries = log.tag_log.len(),
            file_tag_entries = log.file_tag_log.len(),
            "Host log saved"
        );
        Ok(())
    }
}
