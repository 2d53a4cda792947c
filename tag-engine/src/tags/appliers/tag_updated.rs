//! TagUpdated entry applier
//!
//! Mutates only the fields present in the update. An update for an unknown
//! tag id is dropped: its create may not be visible yet.

use super::TagEntryApplier;
use crate::tags::traits::TagMap;
use shared::tag::{TagLogEntry, TagPayload};

/// TagUpdated applier
pub struct TagUpdatedApplier;

impl TagEntryApplier for TagUpdatedApplier {
    fn apply(&self, tags: &mut TagMap, entry: &TagLogEntry) {
        if let TagPayload::Update { tag_id, data } = &entry.payload {
            match tags.get_mut(tag_id) {
                Some(tag) => {
                    data.apply_to(tag);
                    tag.updated_at = entry.timestamp;
                }
                None => {
                    tracing::trace!(tag_id = %tag_id, entry = %entry.id(), "Update for unknown tag ignored");
                }
            }
        }
    }
}
