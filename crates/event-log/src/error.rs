use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when appending to the event log.
#[derive(Debug, Error)]
pub enum EventLogError {
    /// The data directory could not be created.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lock file could not be opened or locked.
    #[error("Failed to acquire lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file could not be opened for appending.
    #[error("Failed to open data file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the record failed.
    #[error("Failed to write to data file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The event could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The blocking append worker panicked or was cancelled.
    #[error("Append worker failed: {0}")]
    Worker(String),
}

/// Result type for event log operations.
pub type Result<T> = std::result::Result<T, EventLogError>;
