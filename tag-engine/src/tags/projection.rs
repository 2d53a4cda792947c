//! ProjectionEngine - deterministic replay of merged logs into current state
//!
//! 1. Sort tag entries by `(timestamp, hostname, seq)` and replay them.
//! 2. Sort file-tag entries the same way and replay them against the FINAL
//!    tag map, not a point-in-time snapshot. Associations of a tag deleted
//!    at any time vanish; adds that precede their tag's create survive.
//! 3. Tags are returned by `(order, created_at, id)`; associations by
//!    `(file_path, tag_id)`.
//!
//! Pure and idempotent: the same merged set always yields the same output.

use super::appliers::{apply_file_tag_entry, apply_tag_entry};
use super::merger::MergedLogs;
use super::traits::{AssociationMap, TagMap};
use shared::tag::{FileTagLogEntry, Tag, TagLogEntry, TagProjection};
use tracing::debug;

/// ProjectionEngine
pub struct ProjectionEngine;

impl ProjectionEngine {
    pub fn project(merged: &MergedLogs) -> TagProjection {
        Self::project_entries(&merged.tag_log, &merged.file_tag_log)
    }

    pub fn project_entries(
        tag_log: &[TagLogEntry],
        file_tag_log: &[FileTagLogEntry],
    ) -> TagProjection {
        let tag_map = Self::replay_tags(tag_log);
        let associations = Self::replay_file_tags(file_tag_log, &tag_map);

        let mut tags: Vec<Tag> = tag_map.into_values().collect();
        tags.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        let file_tags = associations.into_values().collect();

        let projection = TagProjection { tags, file_tags };
        debug!(
            tag_entries = tag_log.len(),
            file_tag_entries = file_tag_log.len(),
            tags = projection.tags.len(),
            file_tags = projection.file_tags.len(),
            "Tag state projected"
        );
        projection
    }

    /// Replay tag entries in total order
    pub fn replay_tags(tag_log: &[TagLogEntry]) -> TagMap {
        let mut ordered: Vec<&TagLogEntry> = tag_log.iter().collect();
        ordered.sort_by(|a, b| a.replay_key().cmp(&b.replay_key()));

        let mut tags = TagMap::new();
        for entry in ordered {
            apply_tag_entry(&mut tags, entry);
        }
        tags
    }

    /// Replay file-tag entries in total order against the final tag map
    pub fn replay_file_tags(file_tag_log: &[FileTagLogEntry], tags: &TagMap) -> AssociationMap {
        let mut ordered: Vec<&FileTagLogEntry> = file_tag_log.iter().collect();
        ordered.sort_by(|a, b| a.replay_key().cmp(&b.replay_key()));

        let mut associations = AssociationMap::new();
        for entry in ordered {
            apply_file_tag_entry(&mut associations, tags, entry);
        }
        associations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::merger::LogMerger;
    use shared::tag::{FileTagPayload, HostLog, TagPayload, TagUpdate};

    fn create(seq: u64, ts: i64, host: &str, tag_id: &str, name: &str, order: Option<i32>) -> TagLogEntry {
        TagLogEntry::new(
            seq,
            ts,
            host,
            TagPayload::Create {
                tag_id: tag_id.to_string(),
                name: name.to_string(),
                color: "#e53935".to_string(),
                order,
            },
        )
    }

    fn update(seq: u64, ts: i64, host: &str, tag_id: &str, data: TagUpdate) -> TagLogEntry {
        TagLogEntry::new(
            seq,
            ts,
            host,
            TagPayload::Update {
                tag_id: tag_id.to_string(),
                data,
            },
        )
    }

    fn delete(seq: u64, ts: i64, host: &str, tag_id: &str) -> TagLogEntry {
        TagLogEntry::new(
            seq,
            ts,
            host,
            TagPayload::Delete {
                tag_id: tag_id.to_string(),
            },
        )
    }

    fn add(seq: u64, ts: i64, host: &str, file: &str, tag_id: &str) -> FileTagLogEntry {
        FileTagLogEntry::new(
            seq,
            ts,
            host,
            FileTagPayload::Add {
                file_path: file.to_string(),
                tag_id: tag_id.to_string(),
            },
        )
    }

    fn remove(seq: u64, ts: i64, host: &str, file: &str, tag_id: &str) -> FileTagLogEntry {
        FileTagLogEntry::new(
            seq,
            ts,
            host,
            FileTagPayload::Remove {
                file_path: file.to_string(),
                tag_id: tag_id.to_string(),
            },
        )
    }

    #[test]
    fn test_entries_replay_by_timestamp_not_insertion_order() {
        // Update listed before its create, but later in time
        let tag_log = vec![
            update(2, 200, "a", "t1", TagUpdate::name("Renamed")),
            create(1, 100, "a", "t1", "Work", Some(0)),
        ];
        let p = ProjectionEngine::project_entries(&tag_log, &[]);
        assert_eq!(p.tags[0].name, "Renamed");
    }

    #[test]
    fn test_timestamp_tie_breaks_on_hostname_then_seq() {
        // Same timestamp: host "a" replays before host "b"
        let tag_log = vec![
            update(1, 100, "b", "t1", TagUpdate::name("From B")),
            update(7, 100, "a", "t1", TagUpdate::name("From A")),
            create(1, 50, "a", "t1", "Work", Some(0)),
        ];
        let p = ProjectionEngine::project_entries(&tag_log, &[]);
        assert_eq!(p.tags[0].name, "From B");
    }

    #[test]
    fn test_update_before_visible_create_is_dropped() {
        // Clock skew: the update is older than the create
        let tag_log = vec![
            create(1, 200, "a", "t1", "Work", Some(0)),
            update(1, 100, "b", "t1", TagUpdate::name("Lost")),
        ];
        let p = ProjectionEngine::project_entries(&tag_log, &[]);
        assert_eq!(p.tags[0].name, "Work");
    }

    #[test]
    fn test_delete_drops_associations_without_remove_entry() {
        let tag_log = vec![
            create(1, 100, "a", "t1", "Work", Some(0)),
            delete(3, 300, "a", "t1"),
        ];
        let file_log = vec![add(2, 200, "a", "notes/a.md", "t1")];

        let p = ProjectionEngine::project_entries(&tag_log, &file_log);
        assert!(p.tags.is_empty());
        assert!(p.file_tags.is_empty());
    }

    #[test]
    fn test_add_before_create_survives_against_final_map() {
        let tag_log = vec![create(1, 500, "a", "t1", "Urgent", Some(0))];
        let file_log = vec![add(1, 100, "b", "notes/b.md", "t1")];

        let p = ProjectionEngine::project_entries(&tag_log, &file_log);
        assert_eq!(p.tags_for_file("notes/b.md")[0].name, "Urgent");
    }

    #[test]
    fn test_remove_then_add_again() {
        let tag_log = vec![create(1, 1, "a", "t1", "Work", Some(0))];
        let file_log = vec![
            add(2, 10, "a", "x.md", "t1"),
            remove(3, 20, "a", "x.md", "t1"),
            add(4, 30, "a", "x.md", "t1"),
        ];

        let p = ProjectionEngine::project_entries(&tag_log, &file_log);
        assert_eq!(p.file_tags.len(), 1);
        assert_eq!(p.file_tags[0].created_at, 30);
    }

    #[test]
    fn test_unknown_tag_add_yields_nothing() {
        let file_log = vec![add(1, 10, "a", "x.md", "never")];
        let p = ProjectionEngine::project_entries(&[], &file_log);
        assert!(p.is_empty());
    }

    #[test]
    fn test_tags_sorted_by_order() {
        let tag_log = vec![
            create(1, 1, "a", "t1", "Third", Some(9)),
            create(2, 2, "a", "t2", "First", Some(0)),
            create(3, 3, "a", "t3", "Second", None), // defaults to 2
        ];
        let p = ProjectionEngine::project_entries(&tag_log, &[]);
        let names: Vec<_> = p.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let mut log = HostLog::new("a");
        log.tag_log = vec![
            create(1, 1, "a", "t1", "Work", None),
            create(2, 2, "a", "t2", "Home", None),
            update(3, 3, "a", "t1", TagUpdate::color("#fdd835")),
        ];
        log.file_tag_log = vec![add(4, 4, "a", "b.md", "t2"), add(5, 5, "a", "a.md", "t1")];
        let merged = LogMerger::merge_logs([log]);

        let first = ProjectionEngine::project(&merged);
        let second = ProjectionEngine::project(&merged);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let mut a = HostLog::new("a");
        a.tag_log = vec![create(1, 10, "a", "t1", "Work", None)];
        a.file_tag_log = vec![remove(3, 40, "a", "x.md", "t1")];
        let mut b = HostLog::new("b");
        b.tag_log = vec![update(1, 20, "b", "t1", TagUpdate::name("Job"))];
        b.file_tag_log = vec![add(2, 30, "b", "x.md", "t1"), add(3, 50, "b", "y.md", "t1")];

        let ab = ProjectionEngine::project(&LogMerger::merge_logs([a.clone(), b.clone()]));
        let ba = ProjectionEngine::project(&LogMerger::merge_logs([b, a]));
        assert_eq!(ab, ba);
        assert_eq!(ab.tags[0].name, "Job");
        assert_eq!(ab.file_tags.len(), 1);
        assert_eq!(ab.file_tags[0].file_path, "y.md");
    }
}
