use std::path::PathBuf;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | TAG_SHARED_DIR | (none) | Shared folder holding notes and host logs |
/// | TAG_HOST_ID | system hostname | Identity of this host |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (none) | Directory for daily-rolling log files |
///
/// # Example
///
/// ```ignore
/// TAG_SHARED_DIR=~/Dropbox/notes TAG_HOST_ID=laptop my-editor
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Shared folder; `None` until a workspace is opened
    pub shared_dir: Option<PathBuf>,
    /// Host identity override; the system hostname is used when unset
    pub host_id: Option<String>,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Log file directory (stdout only when unset)
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            shared_dir: non_empty_var("TAG_SHARED_DIR").map(PathBuf::from),
            host_id: non_empty_var("TAG_HOST_ID"),
            log_level: non_empty_var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty_var("LOG_DIR"),
        }
    }

    /// Override the shared folder and host identity
    ///
    /// Mostly used by tests.
    pub fn with_overrides(shared_dir: impl Into<PathBuf>, host_id: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.shared_dir = Some(shared_dir.into());
        config.host_id = Some(host_id.into());
        config
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
