//! Tag reconciliation module
//!
//! - **storage**: LogStore, durable read/write of one host's log file
//! - **merger**: LogMerger, discovery + concatenation + dedup of all host logs
//! - **appliers** / **projection**: replay of merged entries into current state
//! - **service**: TagService, the only component callers use
//! - **handle**: SharedTagService, serialized access for multi-threaded callers
//!
//! # Data Flow
//!
//! ```text
//! TagService mutation
//!     ├─ 1. Load local HostLog (LogStore)
//!     ├─ 2. Append entry (next seq, monotonic timestamp)
//!     ├─ 3. Persist local log (temp file + atomic rename)
//!     ├─ 4. Merge local log + every peer log in the folder (LogMerger)
//!     ├─ 5. Replay merged entries (ProjectionEngine)
//!     └─ 6. Cache projection (Loaded)
//! ```

pub mod appliers;
pub mod handle;
pub mod merger;
pub mod projection;
pub mod service;
pub mod storage;
pub mod traits;

// Re-exports
pub use handle::SharedTagService;
pub use merger::{LogMerger, MergedLogs, SkippedLog};
pub use projection::ProjectionEngine;
pub use service::{ServiceResult, TagService, TagServiceError};
pub use storage::{LogStore, StorageError, StorageResult};
pub use traits::{
    FixedFolder, FolderSlot, HostIdentity, SharedFolderProvider, StaticHost, SystemHost,
};

// Re-export shared types for convenience
pub use shared::tag::{
    FileTagAssociation, FileTagLogEntry, FileTagPayload, HostLog, Tag, TagFailure, TagFilter,
    TagLogEntry, TagPayload, TagProjection, TagUpdate,
};
