//! Log entry applier implementations
//!
//! Each applier implements `TagEntryApplier` or `FileTagEntryApplier` and
//! handles one entry type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use super::traits::{AssociationMap, TagMap};
use shared::tag::{FileTagLogEntry, FileTagPayload, TagLogEntry, TagPayload};

mod file_tag_added;
mod file_tag_removed;
mod tag_created;
mod tag_deleted;
mod tag_updated;

pub use file_tag_added::FileTagAddedApplier;
pub use file_tag_removed::FileTagRemovedApplier;
pub use tag_created::TagCreatedApplier;
pub use tag_deleted::TagDeletedApplier;
pub use tag_updated::TagUpdatedApplier;

/// Applies one tag log entry to the working tag map
///
/// Appliers are pure: no I/O, no clock, no errors. Entries that reference
/// unknown tags are absorbed.
#[enum_dispatch]
pub trait TagEntryApplier {
    fn apply(&self, tags: &mut TagMap, entry: &TagLogEntry);
}

/// Applies one file-tag log entry against the FINAL tag map
#[enum_dispatch]
pub trait FileTagEntryApplier {
    fn apply(&self, associations: &mut AssociationMap, tags: &TagMap, entry: &FileTagLogEntry);
}

/// TagEntryAction enum - dispatches to concrete tag appliers
#[enum_dispatch(TagEntryApplier)]
pub enum TagEntryAction {
    Created(TagCreatedApplier),
    Updated(TagUpdatedApplier),
    Deleted(TagDeletedApplier),
}

/// Convert TagLogEntry reference to TagEntryAction
///
/// This is the ONLY place with a match on TagPayload for replay.
impl From<&TagLogEntry> for TagEntryAction {
    fn from(entry: &TagLogEntry) -> Self {
        match &entry.payload {
            TagPayload::Create { .. } => TagEntryAction::Created(TagCreatedApplier),
            TagPayload::Update { .. } => TagEntryAction::Updated(TagUpdatedApplier),
            TagPayload::Delete { .. } => TagEntryAction::Deleted(TagDeletedApplier),
        }
    }
}

/// FileTagEntryAction enum - dispatches to concrete file-tag appliers
#[enum_dispatch(FileTagEntryApplier)]
pub enum FileTagEntryAction {
    Added(FileTagAddedApplier),
    Removed(FileTagRemovedApplier),
}

impl From<&FileTagLogEntry> for FileTagEntryAction {
    fn from(entry: &FileTagLogEntry) -> Self {
        match &entry.payload {
            FileTagPayload::Add { .. } => FileTagEntryAction::Added(FileTagAddedApplier),
            FileTagPayload::Remove { .. } => FileTagEntryAction::Removed(FileTagRemovedApplier),
        }
    }
}

/// Apply one tag entry through its applier
pub fn apply_tag_entry(tags: &mut TagMap, entry: &TagLogEntry) {
    let action: TagEntryAction = entry.into();
    action.apply(tags, entry);
}

/// Apply one file-tag entry through its applier
pub fn apply_file_tag_entry(associations: &mut AssociationMap, tags: &TagMap, entry: &FileTagLogEntry) {
    let action: FileTagEntryAction = entry.into();
    action.apply(associations, tags, entry);
}
