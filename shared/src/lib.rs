//! Shared types for the tag engine
//!
//! Data model, log entry types and caller-facing results used by the
//! engine and by the surrounding note editor.

pub mod tag;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use tag::{
    FileTagAssociation, HostLog, Tag, TagFailure, TagFilter, TagProjection, TagUpdate,
};
