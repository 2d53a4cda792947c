//! Tag log entries - immutable records appended by exactly one host

use super::types::TagUpdate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identity of a log entry: originating host + per-host sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId {
    pub host: String,
    pub seq: u64,
}

impl EntryId {
    pub fn new(host: impl Into<String>, seq: u64) -> Self {
        Self {
            host: host.into(),
            seq,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.host, self.seq)
    }
}

/// Tag log action enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagAction {
    Create,
    Update,
    Delete,
}

impl fmt::Display for TagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagAction::Create => write!(f, "CREATE"),
            TagAction::Update => write!(f, "UPDATE"),
            TagAction::Delete => write!(f, "DELETE"),
        }
    }
}

/// Tag entry payload variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagPayload {
    Create {
        tag_id: String,
        name: String,
        color: String,
        /// Defaults to the current tag count at replay time when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<i32>,
    },
    Update {
        tag_id: String,
        data: TagUpdate,
    },
    Delete {
        tag_id: String,
    },
}

impl TagPayload {
    pub fn action(&self) -> TagAction {
        match self {
            TagPayload::Create { .. } => TagAction::Create,
            TagPayload::Update { .. } => TagAction::Update,
            TagPayload::Delete { .. } => TagAction::Delete,
        }
    }

    pub fn tag_id(&self) -> &str {
        match self {
            TagPayload::Create { tag_id, .. }
            | TagPayload::Update { tag_id, .. }
            | TagPayload::Delete { tag_id } => tag_id,
        }
    }
}

/// Tag log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLogEntry {
    /// Per-host sequence, shared with the host's file-tag entries
    pub seq: u64,
    /// Unix milliseconds, never lower than the host's previous entry
    pub timestamp: i64,
    /// Host that appended this entry
    pub hostname: String,
    pub payload: TagPayload,
}

impl TagLogEntry {
    pub fn new(seq: u64, timestamp: i64, hostname: impl Into<String>, payload: TagPayload) -> Self {
        Self {
            seq,
            timestamp,
            hostname: hostname.into(),
            payload,
        }
    }

    pub fn id(&self) -> EntryId {
        EntryId::new(self.hostname.clone(), self.seq)
    }

    /// Total replay order: timestamp, then hostname, then sequence
    pub fn replay_key(&self) -> (i64, &str, u64) {
        (self.timestamp, self.hostname.as_str(), self.seq)
    }

    pub fn action(&self) -> TagAction {
        self.payload.action()
    }
}

/// File-tag log action enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileTagAction {
    Add,
    Remove,
}

impl fmt::Display for FileTagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTagAction::Add => write!(f, "ADD"),
            FileTagAction::Remove => write!(f, "REMOVE"),
        }
    }
}

/// File-tag entry payload variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileTagPayload {
    Add { file_path: String, tag_id: String },
    Remove { file_path: String, tag_id: String },
}

impl FileTagPayload {
    pub fn action(&self) -> FileTagAction {
        match self {
            FileTagPayload::Add { .. } => FileTagAction::Add,
            FileTagPayload::Remove { .. } => FileTagAction::Remove,
        }
    }
}

/// File-tag log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTagLogEntry {
    pub seq: u64,
    pub timestamp: i64,
    pub hostname: String,
    pub payload: FileTagPayload,
}

impl FileTagLogEntry {
    pub fn new(
        seq: u64,
        timestamp: i64,
        hostname: impl Into<String>,
        payload: FileTagPayload,
    ) -> Self {
        Self {
            seq,
            timestamp,
            hostname: hostname.into(),
            payload,
        }
    }

    pub fn id(&self) -> EntryId {
        EntryId::new(self.hostname.clone(), self.seq)
    }

    pub fn replay_key(&self) -> (i64, &str, u64) {
        (self.timestamp, self.hostname.as_str(), self.seq)
    }

    pub fn action(&self) -> FileTagAction {
        self.payload.action()
    }
}
