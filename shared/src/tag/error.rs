//! Caller-facing failure result for tag mutations
//!
//! The engine's own error types stay internal; callers receive a code the
//! UI layer can localize plus the technical message for logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagErrorCode {
    /// No shared folder is open, or it disappeared
    FolderUnavailable,
    /// Disk full while writing the local log
    StorageFull,
    /// Shared folder or log file not writable
    PermissionDenied,
    /// The local host's own log cannot be parsed
    LogCorrupted,
    /// Any other read/write failure
    StorageError,
    /// The referenced tag does not exist
    TagNotFound,
}

impl TagErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            TagErrorCode::FolderUnavailable => "Shared folder is not available",
            TagErrorCode::StorageFull => "Not enough disk space to save tags",
            TagErrorCode::PermissionDenied => "Permission denied while saving tags",
            TagErrorCode::LogCorrupted => "Tag log is corrupted",
            TagErrorCode::StorageError => "Failed to read or write tag log",
            TagErrorCode::TagNotFound => "Tag not found",
        }
    }
}

impl fmt::Display for TagErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Explicit failure result of a tag mutation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct TagFailure {
    pub code: TagErrorCode,
    pub message: String,
}

impl TagFailure {
    pub fn new(code: TagErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_code(code: TagErrorCode) -> Self {
        Self::new(code, code.message())
    }
}
