//! TagCreated entry applier
//!
//! Inserts the tag keyed by its id. A missing `order` defaults to the number
//! of tags present at this point of the replay.

use super::TagEntryApplier;
use crate::tags::traits::TagMap;
use shared::tag::{Tag, TagLogEntry, TagPayload};

/// TagCreated applier
pub struct TagCreatedApplier;

impl TagEntryApplier for TagCreatedApplier {
    fn apply(&self, tags: &mut TagMap, entry: &TagLogEntry) {
        if let TagPayload::Create {
            tag_id,
            name,
            color,
            order,
        } = &entry.payload
        {
            let order = order.unwrap_or(tags.len() as i32);
            tags.insert(
                tag_id.clone(),
                Tag {
                    id: tag_id.clone(),
                    name: name.clone(),
                    color: color.clone(),
                    order,
                    created_at: entry.timestamp,
                    updated_at: entry.timestamp,
                },
            );
        }
    }
}
