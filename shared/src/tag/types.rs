//! Materialized tag state
//!
//! These types are never written directly; they are always the output of
//! replaying the merged host logs.

use serde::{Deserialize, Serialize};

/// Tag entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Opaque id, generated once at creation and never reused
    pub id: String,
    pub name: String,
    /// Palette color (`#rrggbb`) or any caller-provided string
    pub color: String,
    /// Display position; not required to be contiguous
    pub order: i32,
    /// Timestamp of the `CREATE` entry (Unix milliseconds)
    pub created_at: i64,
    /// Timestamp of the last entry that touched this tag (Unix milliseconds)
    pub updated_at: i64,
}

/// Edge between a note file and a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTagAssociation {
    /// Relative path of the note inside the shared folder
    pub file_path: String,
    pub tag_id: String,
    /// Timestamp of the `ADD` entry that created the association
    pub created_at: i64,
}

/// Partial tag update payload
///
/// Absent fields are left untouched when the update is replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl TagUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn order(order: i32) -> Self {
        Self {
            order: Some(order),
            ..Default::default()
        }
    }

    /// True when the update carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.order.is_none()
    }

    /// Apply the present fields to a tag
    pub fn apply_to(&self, tag: &mut Tag) {
        if let Some(name) = &self.name {
            tag.name = name.clone();
        }
        if let Some(color) = &self.color {
            tag.color = color.clone();
        }
        if let Some(order) = self.order {
            tag.order = order;
        }
    }
}
