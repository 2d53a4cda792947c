use super::*;
use shared::tag::{FilterStatus, TagErrorCode, TagFailure, log_file_name};
use std::fs;
use tempfile::TempDir;

fn open_service(dir: &TempDir, host: &str) -> TagService {
    TagService::open(dir.path(), host)
}

/// Service whose folder the test can move or clear
fn slot_service(folder: Option<PathBuf>, host: &str) -> (TagService, Arc<FolderSlot>) {
    let slot = Arc::new(FolderSlot::new(folder));
    let service = TagService::new(slot.clone(), Arc::new(StaticHost::new(host)));
    (service, slot)
}

fn local_log(folder: &Path, host: &str) -> HostLog {
    LogStore::for_host(folder, host).load().unwrap()
}

fn tag_names(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|t| t.name.as_str()).collect()
}

mod test_core;
