//! Replay working maps and external collaborator interfaces

use parking_lot::RwLock;
use shared::tag::{FileTagAssociation, Tag};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Working tag map during replay, keyed by tag id
pub type TagMap = BTreeMap<String, Tag>;

/// Working association map during replay, keyed by `(file_path, tag_id)`
pub type AssociationMap = BTreeMap<(String, String), FileTagAssociation>;

/// Stable identity of "this machine"
///
/// Names the local log file and is written into every appended entry.
pub trait HostIdentity: Send + Sync {
    fn host_id(&self) -> String;
}

/// Tells the engine which directory holds notes and host logs
///
/// A change of folder invalidates the service cache.
pub trait SharedFolderProvider: Send + Sync {
    fn shared_folder(&self) -> Option<PathBuf>;
}

/// Fixed host identity
#[derive(Debug, Clone)]
pub struct StaticHost(pub String);

impl StaticHost {
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }
}

impl HostIdentity for StaticHost {
    fn host_id(&self) -> String {
        self.0.clone()
    }
}

/// Host identity taken from the operating system hostname
#[derive(Debug, Clone)]
pub struct SystemHost {
    name: String,
}

impl SystemHost {
    /// Read the hostname once; falls back to `unknown-host`
    pub fn detect() -> Self {
        let name = match hostname::get() {
            Ok(name) => name.to_string_lossy().trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read system hostname");
                String::new()
            }
        };
        let name = if name.is_empty() {
            "unknown-host".to_string()
        } else {
            name
        };
        Self { name }
    }
}

impl HostIdentity for SystemHost {
    fn host_id(&self) -> String {
        self.name.clone()
    }
}

/// Folder that never changes
#[derive(Debug, Clone)]
pub struct FixedFolder(pub PathBuf);

impl SharedFolderProvider for FixedFolder {
    fn shared_folder(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Folder slot the surrounding application updates when the user opens
/// another workspace
#[derive(Debug, Default)]
pub struct FolderSlot {
    folder: RwLock<Option<PathBuf>>,
}

impl FolderSlot {
    pub fn new(folder: Option<PathBuf>) -> Self {
        Self {
            folder: RwLock::new(folder),
        }
    }

    pub fn set(&self, folder: impl Into<PathBuf>) {
        *self.folder.write() = Some(folder.into());
    }

    pub fn clear(&self) {
        *self.folder.write() = None;
    }
}

impl SharedFolderProvider for FolderSlot {
    fn shared_folder(&self) -> Option<PathBuf> {
        self.folder.read().clone()
    }
}
