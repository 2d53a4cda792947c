//! Tag reconciliation engine for a shared notes folder
//!
//! Several hosts tag the same notes. Each host appends only to its own log
//! file inside the shared folder; any host recomputes the current tags by
//! merging every host's log and replaying it.
//!
//! # Module structure
//!
//! ```text
//! tag-engine/src/
//! ├── core/          # Configuration
//! ├── utils/         # Logging setup
//! └── tags/          # LogStore, LogMerger, ProjectionEngine, TagService
//! ```

pub mod core;
pub mod tags;
pub mod utils;

pub use core::Config;
pub use tags::{
    LogMerger, LogStore, MergedLogs, ProjectionEngine, SharedTagService, StorageError,
    TagService, TagServiceError,
};

pub use utils::logger::{init_logger, init_logger_with_file};
