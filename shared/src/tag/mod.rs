//! Tag reconciliation types
//!
//! Every host appends to its own [`HostLog`]; the current state
//! ([`TagProjection`]) is always recomputed from the merged logs.

pub mod error;
pub mod event;
pub mod filter;
pub mod log;
pub mod palette;
pub mod projection;
pub mod types;

pub use error::{TagErrorCode, TagFailure};
pub use event::{
    EntryId, FileTagAction, FileTagLogEntry, FileTagPayload, TagAction, TagLogEntry, TagPayload,
};
pub use filter::{FilterStatus, TagFilter};
pub use log::{
    HostLog, LOG_FILE_PREFIX, LOG_FILE_SUFFIX, LOG_FORMAT_VERSION, is_log_file_name, log_file_name,
};
pub use palette::{TAG_COLOR_PALETTE, is_palette_color, random_palette_color};
pub use projection::TagProjection;
pub use types::{FileTagAssociation, Tag, TagUpdate};
