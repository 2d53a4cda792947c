//! Per-host log document as persisted in the shared folder

use super::event::{FileTagLogEntry, TagLogEntry};
use serde::{Deserialize, Serialize};

/// Current log document format version
pub const LOG_FORMAT_VERSION: u32 = 1;

/// File name prefix of every per-host log
pub const LOG_FILE_PREFIX: &str = ".tags-";

/// File name suffix of every per-host log
pub const LOG_FILE_SUFFIX: &str = ".json";

/// Full log of one host: everything it has ever appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostLog {
    pub version: u32,
    /// Owning host identity
    pub host: String,
    #[serde(default)]
    pub tag_log: Vec<TagLogEntry>,
    #[serde(default)]
    pub file_tag_log: Vec<FileTagLogEntry>,
}

impl HostLog {
    /// Empty log for a host that has not written anything yet
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            version: LOG_FORMAT_VERSION,
            host: host.into(),
            tag_log: Vec::new(),
            file_tag_log: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag_log.is_empty() && self.file_tag_log.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tag_log.len() + self.file_tag_log.len()
    }

    /// Next sequence number, shared by both entry lists
    pub fn next_seq(&self) -> u64 {
        let tag_max = self.tag_log.iter().map(|e| e.seq).max().unwrap_or(0);
        let file_max = self.file_tag_log.iter().map(|e| e.seq).max().unwrap_or(0);
        tag_max.max(file_max) + 1
    }

    /// Largest timestamp this host has issued so far
    pub fn last_timestamp(&self) -> Option<i64> {
        let tag_max = self.tag_log.iter().map(|e| e.timestamp).max();
        let file_max = self.file_tag_log.iter().map(|e| e.timestamp).max();
        tag_max.max(file_max)
    }

    /// Timestamp for a new entry: wall clock, but never behind our own log
    pub fn next_timestamp(&self, now: i64) -> i64 {
        match self.last_timestamp() {
            Some(last) => now.max(last),
            None => now,
        }
    }
}

/// Deterministic log file name for a host identity
///
/// Bytes outside `[A-Za-z0-9._-]` are written as `%XX`, so distinct hosts
/// never share a file and the same host always maps to the same one.
pub fn log_file_name(host: &str) -> String {
    let mut encoded = String::with_capacity(host.len());
    for byte in host.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            encoded.push(byte as char);
        } else {
            encoded.push('%');
            encoded.push_str(&hex::encode_upper([byte]));
        }
    }
    format!("{}{}{}", LOG_FILE_PREFIX, encoded, LOG_FILE_SUFFIX)
}

/// Whether a directory entry name follows the per-host log naming convention
pub fn is_log_file_name(name: &str) -> bool {
    name.len() > LOG_FILE_PREFIX.len() + LOG_FILE_SUFFIX.len()
        && name.starts_with(LOG_FILE_PREFIX)
        && name.ends_with(LOG_FILE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::event::{FileTagPayload, TagPayload};

    #[test]
    fn test_log_file_name_is_stable_and_escaped() {
        assert_eq!(log_file_name("laptop"), ".tags-laptop.json");
        assert_eq!(log_file_name("desk_01.local"), ".tags-desk_01.local.json");
        assert_eq!(log_file_name("Mac Book/Pro"), ".tags-Mac%20Book%2FPro.json");
        assert_eq!(log_file_name("のMac"), ".tags-%E3%81%AEMac.json");
        assert_eq!(log_file_name("desk-01.local"), log_file_name("desk-01.local"));
    }

    #[test]
    fn test_distinct_hosts_get_distinct_files() {
        let hosts = ["山田のMac", "佐藤のMac", "a b", "a_b", "a%20b", "a/b"];
        let names: std::collections::BTreeSet<String> =
            hosts.iter().map(|h| log_file_name(h)).collect();
        assert_eq!(names.len(), hosts.len());
        assert!(names.iter().all(|n| is_log_file_name(n)));
    }

    #[test]
    fn test_is_log_file_name() {
        assert!(is_log_file_name(".tags-laptop.json"));
        assert!(!is_log_file_name(".tags-.json"));
        assert!(!is_log_file_name("tags-laptop.json"));
        assert!(!is_log_file_name(".tags-laptop.json.tmp"));
        assert!(!is_log_file_name("notes.md"));
    }

    #[test]
    fn test_next_seq_spans_both_lists() {
        let mut log = HostLog::new("h");
        assert_eq!(log.next_seq(), 1);

        log.tag_log.push(TagLogEntry::new(
            1,
            10,
            "h",
            TagPayload::Delete {
                tag_id: "t".to_string(),
            },
        ));
        log.file_tag_log.push(FileTagLogEntry::new(
            2,
            20,
            "h",
            FileTagPayload::Add {
                file_path: "a.md".to_string(),
                tag_id: "t".to_string(),
            },
        ));

        assert_eq!(log.next_seq(), 3);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_next_timestamp_never_goes_backwards() {
        let mut log = HostLog::new("h");
        assert_eq!(log.next_timestamp(50), 50);

        log.tag_log.push(TagLogEntry::new(
            1,
            100,
            "h",
            TagPayload::Delete {
                tag_id: "t".to_string(),
            },
        ));
        assert_eq!(log.next_timestamp(50), 100);
        assert_eq!(log.next_timestamp(150), 150);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let log: HostLog = serde_json::from_str(r#"{"version":1,"host":"h"}"#).unwrap();
        assert!(log.is_empty());
    }
}
