//! TagDeleted entry applier
//!
//! Removes the tag. Its associations are not touched here; they disappear
//! because file-tag replay only materializes tags of the final map.

use super::TagEntryApplier;
use crate::tags::traits::TagMap;
use shared::tag::{TagLogEntry, TagPayload};

/// TagDeleted applier
pub struct TagDeletedApplier;

impl TagEntryApplier for TagDeletedApplier {
    fn apply(&self, tags: &mut TagMap, entry: &TagLogEntry) {
        if let TagPayload::Delete { tag_id } = &entry.payload {
            tags.remove(tag_id);
        }
    }
}
