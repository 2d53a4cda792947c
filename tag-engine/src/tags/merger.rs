//! LogMerger - one deduplicated log set from every host log in a folder
//!
//! Entries are deduplicated on their canonical [`EntryId`] (host + per-host
//! sequence). The same log can therefore be fed twice, e.g. once as the
//! in-memory local log and once as the file discovered on disk, without
//! double-counting anything.
//!
//! A host file that cannot be read or parsed is skipped with a warning; the
//! merge continues with the remaining hosts.

use super::storage::{LogStore, StorageError, StorageResult};
use shared::tag::{
    EntryId, FileTagLogEntry, HostLog, LOG_FILE_PREFIX, LOG_FILE_SUFFIX, TagLogEntry,
    is_log_file_name,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A host log that was left out of the merge
#[derive(Debug, Clone)]
pub struct SkippedLog {
    pub path: PathBuf,
    pub reason: String,
}

/// Concatenated, deduplicated entries of all hosts (not yet ordered)
#[derive(Debug, Clone, Default)]
pub struct MergedLogs {
    pub tag_log: Vec<TagLogEntry>,
    pub file_tag_log: Vec<FileTagLogEntry>,
    /// Hosts that contributed a log, in merge order
    pub hosts: Vec<String>,
    /// Host files that could not be used
    pub skipped: Vec<SkippedLog>,
    seen_tag_entries: HashSet<EntryId>,
    seen_file_tag_entries: HashSet<EntryId>,
}

impl MergedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_log.is_empty() && self.file_tag_log.is_empty()
    }

    /// Add one host's log; entries already present are dropped
    pub fn push_log(&mut self, log: HostLog) {
        let before = self.tag_log.len() + self.file_tag_log.len();
        let offered = log.len();

        for entry in log.tag_log {
            if self.seen_tag_entries.insert(entry.id()) {
                self.tag_log.push(entry);
            }
        }
        for entry in log.file_tag_log {
            if self.seen_file_tag_entries.insert(entry.id()) {
                self.file_tag_log.push(entry);
            }
        }

        let added = self.tag_log.len() + self.file_tag_log.len() - before;
        if added < offered {
            debug!(
                host = %log.host,
                duplicates = offered - added,
                "Dropped duplicate log entries"
            );
        }
        if !self.hosts.contains(&log.host) {
            self.hosts.push(log.host);
        }
    }

    /// Add a single tag entry (dedup applies)
    pub fn push_tag_entry(&mut self, entry: TagLogEntry) -> bool {
        let fresh = self.seen_tag_entries.insert(entry.id());
        if fresh {
            self.tag_log.push(entry);
        }
        fresh
    }

    /// Add a single file-tag entry (dedup applies)
    pub fn push_file_tag_entry(&mut self, entry: FileTagLogEntry) -> bool {
        let fresh = self.seen_file_tag_entries.insert(entry.id());
        if fresh {
            self.file_tag_log.push(entry);
        }
        fresh
    }
}

/// LogMerger
pub struct LogMerger;

impl LogMerger {
    /// List every per-host log file in `folder`, sorted by path
    pub fn discover(folder: &Path) -> StorageResult<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(StorageError::FolderUnavailable(folder.to_path_buf()));
        }

        let entries = fs::read_dir(folder).map_err(|source| StorageError::Io {
            path: folder.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(folder = %folder.display(), error = %e, "Failed to read directory entry");
                    continue;
                }
            };
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if is_log_file_name(name) && entry.path().is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Merge every host log found in `folder`
    ///
    /// An empty folder yields an empty (well-formed) result.
    pub fn merge_all(folder: &Path) -> StorageResult<MergedLogs> {
        let mut merged = MergedLogs::new();
        Self::merge_folder_into(folder, &mut merged)?;
        Ok(merged)
    }

    /// Merge the in-memory local log plus every host log found in `folder`
    ///
    /// The local log's own file is discovered too; dedup collapses it.
    pub fn merge_with_local(folder: &Path, local: &HostLog) -> StorageResult<MergedLogs> {
        let mut merged = MergedLogs::new();
        merged.push_log(local.clone());
        Self::merge_folder_into(folder, &mut merged)?;
        Ok(merged)
    }

    /// Merge already loaded logs, in the given order
    pub fn merge_logs(logs: impl IntoIterator<Item = HostLog>) -> MergedLogs {
        let mut merged = MergedLogs::new();
        for log in logs {
            merged.push_log(log);
        }
        merged
    }

    fn merge_folder_into(folder: &Path, merged: &mut MergedLogs) -> StorageResult<()> {
        let paths = Self::discover(folder)?;

        for path in paths {
            let store = LogStore::at(&path, host_hint(&path));
            match store.load() {
                Ok(log) => merged.push_log(log),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        malformed = e.is_malformed(),
                        "Skipping unreadable host log"
                    );
                    merged.skipped.push(SkippedLog {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            folder = %folder.display(),
            hosts = merged.hosts.len(),
            skipped = merged.skipped.len(),
            tag_entries = merged.tag_log.len(),
            file_tag_entries = merged.file_tag_log.len(),
            "Host logs merged"
        );
        Ok(())
    }
}

/// Host name as encoded in a log file name (escaped form)
fn host_hint(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix(LOG_FILE_PREFIX))
        .and_then(|n| n.strip_suffix(LOG_FILE_SUFFIX))
        .unwrap_or_default()
        .to_string()
}
