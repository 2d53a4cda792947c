//! SharedTagService - one TagService shared by many threads
//!
//! Every call takes the lock for its whole duration, so mutations from
//! different threads are serialized and the local log never sees two
//! concurrent appends.

use super::service::{ServiceResult, TagService};
use crate::core::Config;
use parking_lot::Mutex;
use shared::tag::{Tag, TagFilter, TagProjection, TagUpdate};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedTagService {
    inner: Arc<Mutex<TagService>>,
}

impl SharedTagService {
    pub fn new(service: TagService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    pub fn open(folder: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self::new(TagService::open(folder, host))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(TagService::from_config(config))
    }

    /// Run `f` with exclusive access, for call sequences that must not interleave
    pub fn with<R>(&self, f: impl FnOnce(&mut TagService) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn host_id(&self) -> String {
        self.inner.lock().host_id()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.lock().is_loaded()
    }

    pub fn invalidate(&self) {
        self.inner.lock().invalidate();
    }

    pub fn create_tag(
        &self,
        name: impl Into<String>,
        color: impl Into<String>,
        order: Option<i32>,
    ) -> ServiceResult<String> {
        self.inner.lock().create_tag(name, color, order)
    }

    pub fn update_tag(&self, tag_id: &str, data: TagUpdate) -> ServiceResult<()> {
        self.inner.lock().update_tag(tag_id, data)
    }

    pub fn delete_tag(&self, tag_id: &str) -> ServiceResult<()> {
        self.inner.lock().delete_tag(tag_id)
    }

    pub fn add_file_tag(&self, file_path: &str, tag_id: &str) -> ServiceResult<()> {
        self.inner.lock().add_file_tag(file_path, tag_id)
    }

    pub fn remove_file_tag(&self, file_path: &str, tag_id: &str) -> ServiceResult<()> {
        self.inner.lock().remove_file_tag(file_path, tag_id)
    }

    pub fn toggle_file_tag(&self, file_path: &str, tag_id: &str) -> ServiceResult<bool> {
        self.inner.lock().toggle_file_tag(file_path, tag_id)
    }

    pub fn reorder_tag(&self, tag_id: &str, new_index: usize) -> ServiceResult<()> {
        self.inner.lock().reorder_tag(tag_id, new_index)
    }

    pub fn get_state(&self) -> TagProjection {
        self.inner.lock().get_state()
    }

    pub fn get_tags(&self) -> Vec<Tag> {
        self.inner.lock().get_tags()
    }

    pub fn get_file_tags(&self, file_path: &str) -> Vec<Tag> {
        self.inner.lock().get_file_tags(file_path)
    }

    pub fn search_tags(&self, query: &str) -> Vec<Tag> {
        self.inner.lock().search_tags(query)
    }

    pub fn find_tag_by_name(&self, name: &str) -> Option<Tag> {
        self.inner.lock().find_tag_by_name(name)
    }

    pub fn tag_usage_counts(&self) -> Vec<(Tag, usize)> {
        self.inner.lock().tag_usage_counts()
    }

    pub fn file_matches_filter(&self, file_path: &str, filter: &TagFilter) -> bool {
        self.inner.lock().file_matches_filter(file_path, filter)
    }
}
