//! TagService - the only component callers use
//!
//! Mutations append to the local host log, persist it, then re-merge and
//! re-project. Queries serve a cached projection.
//!
//! # State machine
//!
//! ```text
//!            query / mutation (merge + project)
//! Unloaded ──────────────────────────────────────▶ Loaded
//!    ▲                                               │  mutation: append + persist
//!    │              invalidate() / folder change     │          + merge + project
//!    └───────────────────────────────────────────────┘
//! ```
//!
//! The service holds no lock of its own; callers that share it across
//! threads go through [`SharedTagService`](super::handle::SharedTagService).

mod error;
pub use error::*;

#[cfg(test)]
mod tests;

use super::merger::LogMerger;
use super::projection::ProjectionEngine;
use super::storage::{LogStore, StorageError};
use super::traits::{FixedFolder, FolderSlot, HostIdentity, SharedFolderProvider, StaticHost, SystemHost};
use crate::core::Config;
use shared::tag::{
    FileTagLogEntry, FileTagPayload, HostLog, Tag, TagFilter, TagLogEntry, TagPayload,
    TagProjection, TagUpdate,
};
use shared::util::{new_tag_id, now_millis};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cached projection
#[derive(Debug, Default)]
enum CacheState {
    #[default]
    Unloaded,
    Loaded {
        folder: PathBuf,
        projection: TagProjection,
    },
}

/// This host's log, as last loaded or saved
#[derive(Debug)]
struct LocalLog {
    folder: PathBuf,
    log: HostLog,
}

/// Entry waiting to be appended to the local log
enum PendingEntry {
    Tag(TagPayload),
    FileTag(FileTagPayload),
}

/// TagService
pub struct TagService {
    folders: Arc<dyn SharedFolderProvider>,
    host: Arc<dyn HostIdentity>,
    cache: CacheState,
    local: Option<LocalLog>,
}

impl std::fmt::Debug for TagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagService")
            .field("host", &self.host.host_id())
            .field("folder", &self.folders.shared_folder())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl TagService {
    pub fn new(folders: Arc<dyn SharedFolderProvider>, host: Arc<dyn HostIdentity>) -> Self {
        Self {
            folders,
            host,
            cache: CacheState::Unloaded,
            local: None,
        }
    }

    /// Service over a fixed folder with a fixed host identity
    pub fn open(folder: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self::new(
            Arc::new(FixedFolder(folder.into())),
            Arc::new(StaticHost::new(host)),
        )
    }

    /// Service built from configuration; the host falls back to the system hostname
    pub fn from_config(config: &Config) -> Self {
        let host: Arc<dyn HostIdentity> = match &config.host_id {
            Some(id) => Arc::new(StaticHost::new(id.clone())),
            None => Arc::new(SystemHost::detect()),
        };
        Self::new(Arc::new(FolderSlot::new(config.shared_dir.clone())), host)
    }

    pub fn host_id(&self) -> String {
        self.host.host_id()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.cache, CacheState::Loaded { .. })
    }

    /// Discard the cached projection and local log
    ///
    /// The next query or mutation re-merges from scratch.
    pub fn invalidate(&mut self) {
        if self.is_loaded() || self.local.is_some() {
            debug!("Tag cache invalidated");
        }
        self.cache = CacheState::Unloaded;
        self.local = None;
    }

    // ========== Mutations ==========

    /// Create a tag and return its new id
    ///
    /// Duplicate names are allowed; callers wanting unique names check
    /// [`find_tag_by_name`](Self::find_tag_by_name) first.
    pub fn create_tag(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        order: Option<i32>,
    ) -> ServiceResult<String> {
        let order = match order {
            Some(order) => order,
            None => self.get_tags().len() as i32,
        };
        let tag_id = new_tag_id();
        let name = name.into();

        self.commit(vec![PendingEntry::Tag(TagPayload::Create {
            tag_id: tag_id.clone(),
            name: name.clone(),
            color: color.into(),
            order: Some(order),
        })])?;

        info!(tag_id = %tag_id, name = %name, order, "Tag created");
        Ok(tag_id)
    }

    /// Update the supplied fields of a tag
    ///
    /// An unknown id is not an error: the entry is logged and ignored by
    /// projection.
    pub fn update_tag(&mut self, tag_id: &str, data: TagUpdate) -> ServiceResult<()> {
        self.commit(vec![PendingEntry::Tag(TagPayload::Update {
            tag_id: tag_id.to_string(),
            data,
        })])?;
        info!(tag_id = %tag_id, "Tag updated");
        Ok(())
    }

    /// Delete a tag; its associations disappear on projection
    pub fn delete_tag(&mut self, tag_id: &str) -> ServiceResult<()> {
        self.commit(vec![PendingEntry::Tag(TagPayload::Delete {
            tag_id: tag_id.to_string(),
        })])?;
        info!(tag_id = %tag_id, "Tag deleted");
        Ok(())
    }

    pub fn add_file_tag(&mut self, file_path: &str, tag_id: &str) -> ServiceResult<()> {
        self.commit(vec![PendingEntry::FileTag(FileTagPayload::Add {
            file_path: file_path.to_string(),
            tag_id: tag_id.to_string(),
        })])?;
        info!(file_path = %file_path, tag_id = %tag_id, "Tag assigned");
        Ok(())
    }

    pub fn remove_file_tag(&mut self, file_path: &str, tag_id: &str) -> ServiceResult<()> {
        self.commit(vec![PendingEntry::FileTag(FileTagPayload::Remove {
            file_path: file_path.to_string(),
            tag_id: tag_id.to_string(),
        })])?;
        info!(file_path = %file_path, tag_id = %tag_id, "Tag unassigned");
        Ok(())
    }

    /// Assign the tag if the file lacks it, otherwise remove it
    ///
    /// Returns whether the tag is assigned afterwards.
    pub fn toggle_file_tag(&mut self, file_path: &str, tag_id: &str) -> ServiceResult<bool> {
        let assigned = self
            .get_file_tags(file_path)
            .iter()
            .any(|t| t.id == tag_id);

        if assigned {
            self.remove_file_tag(file_path, tag_id)?;
        } else {
            self.add_file_tag(file_path, tag_id)?;
        }
        Ok(!assigned)
    }

    /// Move a tag to `new_index` in display order
    ///
    /// Every tag whose position changes gets an `order` update; all updates
    /// are persisted in one save.
    pub fn reorder_tag(&mut self, tag_id: &str, new_index: usize) -> ServiceResult<()> {
        let mut tags = self.get_tags();
        let Some(from) = tags.iter().position(|t| t.id == tag_id) else {
            return Err(TagServiceError::TagNotFound(tag_id.to_string()));
        };

        let tag = tags.remove(from);
        let to = new_index.min(tags.len());
        tags.insert(to, tag);

        let pending: Vec<PendingEntry> = tags
            .iter()
            .enumerate()
            .filter(|(i, t)| t.order != *i as i32)
            .map(|(i, t)| {
                PendingEntry::Tag(TagPayload::Update {
                    tag_id: t.id.clone(),
                    data: TagUpdate::order(i as i32),
                })
            })
            .collect();

        if pending.is_empty() {
            return Ok(());
        }

        let changed = pending.len();
        self.commit(pending)?;
        info!(tag_id = %tag_id, from, to, changed, "Tag reordered");
        Ok(())
    }

    // ========== Queries ==========

    /// Current tags and associations; empty when unavailable
    pub fn get_state(&mut self) -> TagProjection {
        self.projection().cloned().unwrap_or_default()
    }

    /// All tags in display order
    pub fn get_tags(&mut self) -> Vec<Tag> {
        self.projection()
            .map(|p| p.tags.clone())
            .unwrap_or_default()
    }

    /// Tags of one file in display order
    pub fn get_file_tags(&mut self, file_path: &str) -> Vec<Tag> {
        self.projection()
            .map(|p| p.tags_for_file(file_path))
            .unwrap_or_default()
    }

    pub fn search_tags(&mut self, query: &str) -> Vec<Tag> {
        self.projection()
            .map(|p| p.search_tags(query))
            .unwrap_or_default()
    }

    pub fn find_tag_by_name(&mut self, name: &str) -> Option<Tag> {
        self.projection()
            .and_then(|p| p.find_tag_by_name(name).cloned())
    }

    /// Number of files per tag, in display order
    pub fn tag_usage_counts(&mut self) -> Vec<(Tag, usize)> {
        self.projection()
            .map(|p| p.usage_counts())
            .unwrap_or_default()
    }

    pub fn file_matches_filter(&mut self, file_path: &str, filter: &TagFilter) -> bool {
        match self.projection() {
            Some(p) => p.file_matches_filter(file_path, filter),
            None => filter.matches::<&str>(&[]),
        }
    }

    // ========== Internals ==========

    /// Current folder; drops the cache when the provider moved elsewhere
    fn current_folder(&mut self) -> Option<PathBuf> {
        let folder = self.folders.shared_folder();

        let cached_folder = match (&self.cache, &self.local) {
            (CacheState::Loaded { folder, .. }, _) => Some(folder),
            (CacheState::Unloaded, Some(local)) => Some(&local.folder),
            _ => None,
        };
        if let Some(cached) = cached_folder
            && folder.as_deref() != Some(cached.as_path())
        {
            info!(
                from = %cached.display(),
                to = ?folder,
                "Shared folder changed"
            );
            self.invalidate();
        }

        folder
    }

    /// Cached projection, loading it first when Unloaded
    ///
    /// Failures degrade to `None` and leave the service Unloaded.
    fn projection(&mut self) -> Option<&TagProjection> {
        let folder = self.current_folder()?;

        if !self.is_loaded()
            && let Err(e) = self.refresh(&folder)
        {
            warn!(folder = %folder.display(), error = %e, "Failed to load tags");
            return None;
        }

        match &self.cache {
            CacheState::Loaded { projection, .. } => Some(projection),
            CacheState::Unloaded => None,
        }
    }

    /// Merge + project, then cache as Loaded
    fn refresh(&mut self, folder: &Path) -> Result<(), StorageError> {
        let merged = match &self.local {
            Some(local) => LogMerger::merge_with_local(folder, &local.log)?,
            None => LogMerger::merge_all(folder)?,
        };
        let projection = ProjectionEngine::project(&merged);

        self.cache = CacheState::Loaded {
            folder: folder.to_path_buf(),
            projection,
        };
        Ok(())
    }

    /// This host's log for `folder`, loaded on first use
    fn local_log(&mut self, folder: &Path, host: &str) -> Result<HostLog, StorageError> {
        if let Some(local) = &self.local {
            return Ok(local.log.clone());
        }

        let log = LogStore::for_host(folder, host).load_own()?;
        debug!(host = %host, entries = log.len(), "Local tag log loaded");
        self.local = Some(LocalLog {
            folder: folder.to_path_buf(),
            log: log.clone(),
        });
        Ok(log)
    }

    /// Append entries to the local log, persist, then re-project
    ///
    /// A failed save leaves the in-memory state untouched. Once the save
    /// succeeded the mutation is reported as done, even if re-projection
    /// fails.
    fn commit(&mut self, pending: Vec<PendingEntry>) -> ServiceResult<()> {
        let folder = self.current_folder().ok_or(StorageError::NoSharedFolder)?;
        let host = self.host.host_id();

        let mut log = self.local_log(&folder, &host)?;
        let now = now_millis();
        for entry in pending {
            let seq = log.next_seq();
            let timestamp = log.next_timestamp(now);
            match entry {
                PendingEntry::Tag(payload) => {
                    log.tag_log
                        .push(TagLogEntry::new(seq, timestamp, host.as_str(), payload));
                }
                PendingEntry::FileTag(payload) => {
                    log.file_tag_log
                        .push(FileTagLogEntry::new(seq, timestamp, host.as_str(), payload));
                }
            }
        }

        LogStore::for_host(&folder, &host).save(&log)?;
        self.local = Some(LocalLog {
            folder: folder.clone(),
            log,
        });

        self.reproject(&folder);
        Ok(())
    }

    /// Rebuild the projection after a successful save
    ///
    /// The old projection is dropped first; on failure the service stays
    /// Unloaded and the next query retries.
    fn reproject(&mut self, folder: &Path) {
        self.cache = CacheState::Unloaded;
        if let Err(e) = self.refresh(folder) {
            warn!(folder = %folder.display(), error = %e, "Failed to re-project tags after save");
        }
    }
}
