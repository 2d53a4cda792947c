//! FileTagRemoved entry applier
//!
//! Removes the `(file_path, tag_id)` association unconditionally.

use super::FileTagEntryApplier;
use crate::tags::traits::{AssociationMap, TagMap};
use shared::tag::{FileTagLogEntry, FileTagPayload};

/// FileTagRemoved applier
pub struct FileTagRemovedApplier;

impl FileTagEntryApplier for FileTagRemovedApplier {
    fn apply(&self, associations: &mut AssociationMap, _tags: &TagMap, entry: &FileTagLogEntry) {
        if let FileTagPayload::Remove { file_path, tag_id } = &entry.payload {
            associations.remove(&(file_path.clone(), tag_id.clone()));
        }
    }
}
