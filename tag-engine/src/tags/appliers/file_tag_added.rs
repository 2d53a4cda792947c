//! FileTagAdded entry applier
//!
//! Materializes the association only if the tag exists in the final tag
//! map. An association that already exists keeps its original `created_at`.

use super::FileTagEntryApplier;
use crate::tags::traits::{AssociationMap, TagMap};
use shared::tag::{FileTagAssociation, FileTagLogEntry, FileTagPayload};

/// FileTagAdded applier
pub struct FileTagAddedApplier;

impl FileTagEntryApplier for FileTagAddedApplier {
    fn apply(&self, associations: &mut AssociationMap, tags: &TagMap, entry: &FileTagLogEntry) {
        if let FileTagPayload::Add { file_path, tag_id } = &entry.payload {
            if !tags.contains_key(tag_id) {
                tracing::trace!(
                    tag_id = %tag_id,
                    file_path = %file_path,
                    entry = %entry.id(),
                    "Association with unknown tag ignored"
                );
                return;
            }

            associations
                .entry((file_path.clone(), tag_id.clone()))
                .or_insert_with(|| FileTagAssociation {
                    file_path: file_path.clone(),
                    tag_id: tag_id.clone(),
                    created_at: entry.timestamp,
                });
        }
    }
}
