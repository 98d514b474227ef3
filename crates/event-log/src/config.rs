//! Event log location.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Where the event log lives on disk.
///
/// Reads from environment variables:
/// - `DATA_DIR` — directory holding the log (default: `"data"`)
/// - `DATA_FILE` — log file name inside `DATA_DIR` (default: `"data.jsonl"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl EventLogConfig {
    /// Creates a config for `data.jsonl` inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var_os("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            file_name: std::env::var("DATA_FILE").unwrap_or(defaults.file_name),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the newline-delimited JSON log.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Path of the sibling lock file (`<data file>.lock`).
    pub fn lock_file(&self) -> PathBuf {
        let mut name = OsString::from(&self.file_name);
        name.push(".lock");
        self.data_dir.join(name)
    }
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_name: "data.jsonl".to_string(),
        }
    }
}
