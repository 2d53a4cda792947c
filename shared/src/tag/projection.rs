//! Projected tag state - computed from the merged host logs

use super::filter::TagFilter;
use super::types::{FileTagAssociation, Tag};
use serde::{Deserialize, Serialize};

/// Current tags and file-tag associations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagProjection {
    /// Sorted by `order` for presentation
    pub tags: Vec<Tag>,
    /// Unordered in meaning; kept sorted by `(file_path, tag_id)`
    pub file_tags: Vec<FileTagAssociation>,
}

impl TagProjection {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.file_tags.is_empty()
    }

    pub fn find_tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    /// Exact match on the trimmed name
    pub fn find_tag_by_name(&self, name: &str) -> Option<&Tag> {
        let name = name.trim();
        self.tags.iter().find(|t| t.name == name)
    }

    /// Case-insensitive substring search on tag names, in display order
    pub fn search_tags(&self, query: &str) -> Vec<Tag> {
        let query = query.to_lowercase();
        self.tags
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    pub fn tag_ids_for_file(&self, file_path: &str) -> Vec<&str> {
        self.file_tags
            .iter()
            .filter(|ft| ft.file_path == file_path)
            .map(|ft| ft.tag_id.as_str())
            .collect()
    }

    /// Tags of a file, in display order
    pub fn tags_for_file(&self, file_path: &str) -> Vec<Tag> {
        let ids = self.tag_ids_for_file(file_path);
        self.tags
            .iter()
            .filter(|t| ids.contains(&t.id.as_str()))
            .cloned()
            .collect()
    }

    pub fn files_for_tag(&self, tag_id: &str) -> Vec<&str> {
        self.file_tags
            .iter()
            .filter(|ft| ft.tag_id == tag_id)
            .map(|ft| ft.file_path.as_str())
            .collect()
    }

    pub fn is_tagged(&self, file_path: &str, tag_id: &str) -> bool {
        self.file_tags
            .iter()
            .any(|ft| ft.file_path == file_path && ft.tag_id == tag_id)
    }

    /// Number of files per tag, in display order
    pub fn usage_counts(&self) -> Vec<(Tag, usize)> {
        self.tags
            .iter()
            .map(|t| {
                let count = self.file_tags.iter().filter(|ft| ft.tag_id == t.id).count();
                (t.clone(), count)
            })
            .collect()
    }

    pub fn file_matches_filter(&self, file_path: &str, filter: &TagFilter) -> bool {
        filter.matches(&self.tag_ids_for_file(file_path))
    }
}
