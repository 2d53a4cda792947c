//! Tri-state tag filter for the note list
//!
//! Each tag is `None`, `Show` or `Hide`. Hide wins over Show: a file
//! carrying any hidden tag is excluded. When at least one tag is marked
//! Show, only files carrying one of those tags pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterStatus {
    #[default]
    None,
    Show,
    Hide,
}

impl FilterStatus {
    /// none → show → hide → none
    pub fn next(self) -> Self {
        match self {
            FilterStatus::None => FilterStatus::Show,
            FilterStatus::Show => FilterStatus::Hide,
            FilterStatus::Hide => FilterStatus::None,
        }
    }
}

/// Per-tag filter state, keyed by tag id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagFilter {
    statuses: BTreeMap<String, FilterStatus>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, tag_id: &str) -> FilterStatus {
        self.statuses.get(tag_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, tag_id: impl Into<String>, status: FilterStatus) {
        let tag_id = tag_id.into();
        if status == FilterStatus::None {
            self.statuses.remove(&tag_id);
        } else {
            self.statuses.insert(tag_id, status);
        }
    }

    /// Advance a tag to its next status and return it
    pub fn cycle(&mut self, tag_id: &str) -> FilterStatus {
        let next = self.status(tag_id).next();
        self.set(tag_id, next);
        next
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    pub fn has_active_filter(&self) -> bool {
        self.statuses.values().any(|s| *s != FilterStatus::None)
    }

    /// Drop entries for tags that no longer exist
    pub fn retain_known<'a>(&mut self, known: impl IntoIterator<Item = &'a str>) {
        let known: std::collections::BTreeSet<&str> = known.into_iter().collect();
        self.statuses.retain(|id, _| known.contains(id.as_str()));
    }

    /// Whether a file carrying `file_tag_ids` passes the filter
    pub fn matches<S: AsRef<str>>(&self, file_tag_ids: &[S]) -> bool {
        let has = |id: &str| file_tag_ids.iter().any(|t| t.as_ref() == id);

        let mut show_tags = self
            .statuses
            .iter()
            .filter(|(_, s)| **s == FilterStatus::Show)
            .map(|(id, _)| id.as_str())
            .peekable();
        let mut hide_tags = self
            .statuses
            .iter()
            .filter(|(_, s)| **s == FilterStatus::Hide)
            .map(|(id, _)| id.as_str());

        if hide_tags.any(has) {
            return false;
        }

        if show_tags.peek().is_some() {
            return show_tags.any(has);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_goes_through_three_states() {
        let mut filter = TagFilter::new();
        assert_eq!(filter.cycle("t1"), FilterStatus::Show);
        assert_eq!(filter.cycle("t1"), FilterStatus::Hide);
        assert_eq!(filter.cycle("t1"), FilterStatus::None);
        assert!(!filter.has_active_filter());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TagFilter::new();
        assert!(filter.matches::<&str>(&[]));
        assert!(filter.matches(&["t1"]));
    }

    #[test]
    fn test_hide_wins_over_show() {
        let mut filter = TagFilter::new();
        filter.set("work", FilterStatus::Show);
        filter.set("done", FilterStatus::Hide);

        assert!(filter.matches(&["work"]));
        assert!(!filter.matches(&["work", "done"]));
        assert!(!filter.matches(&["other"]));
        assert!(!filter.matches::<&str>(&[]));
    }

    #[test]
    fn test_hide_only_keeps_untagged_files() {
        let mut filter = TagFilter::new();
        filter.set("done", FilterStatus::Hide);

        assert!(filter.matches::<&str>(&[]));
        assert!(filter.matches(&["work"]));
        assert!(!filter.matches(&["done"]));
    }

    #[test]
    fn test_retain_known_and_session_round_trip() {
        let mut filter = TagFilter::new();
        filter.set("a", FilterStatus::Show);
        filter.set("gone", FilterStatus::Hide);
        filter.retain_known(["a", "b"]);

        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"a":"show"}"#);

        let restored: TagFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.status("a"), FilterStatus::Show);
        assert_eq!(restored.status("gone"), FilterStatus::None);
    }
}
