use super::super::storage::StorageError;
use shared::tag::{TagErrorCode, TagFailure};
use std::io;
use thiserror::Error;

/// Service errors
#[derive(Debug, Error)]
pub enum TagServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Tag not found: {0}")]
    TagNotFound(String),
}

/// Classify a storage error into a caller-facing code
fn classify_storage_error(e: &StorageError) -> TagErrorCode {
    let source = match e {
        StorageError::NoSharedFolder | StorageError::FolderUnavailable(_) => {
            return TagErrorCode::FolderUnavailable;
        }
        StorageError::Malformed { .. }
        | StorageError::UnsupportedVersion { .. }
        | StorageError::HostMismatch { .. } => {
            return TagErrorCode::LogCorrupted;
        }
        StorageError::Serialization(_) => return TagErrorCode::StorageError,
        StorageError::Io { source, .. } => source,
    };

    match source.kind() {
        io::ErrorKind::NotFound => return TagErrorCode::FolderUnavailable,
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            return TagErrorCode::PermissionDenied;
        }
        io::ErrorKind::StorageFull => return TagErrorCode::StorageFull,
        _ => {}
    }

    // Not every platform maps ENOSPC to StorageFull
    let err_str = source.to_string().to_lowercase();
    if err_str.contains("no space") || err_str.contains("disk full") {
        return TagErrorCode::StorageFull;
    }

    TagErrorCode::StorageError
}

impl From<TagServiceError> for TagFailure {
    fn from(err: TagServiceError) -> Self {
        match err {
            TagServiceError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Tag storage error occurred");
                TagFailure::new(code, e.to_string())
            }
            TagServiceError::TagNotFound(id) => {
                TagFailure::new(TagErrorCode::TagNotFound, format!("Tag not found: {}", id))
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, TagServiceError>;
