//! Error types for Sentinel
//!
//! Uses `thiserror` for library errors. Cache misses are not errors: lookups
//! return `Option`/`bool` because a miss is the common case.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Sentinel operations
pub type SentinelResult<T> = Result<T, SentinelError>;

/// Main error type for Sentinel operations
#[derive(Error, Debug)]
pub enum SentinelError {
    /// Path could not be stat'ed or does not exist
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// Reading a file for hashing failed
    #[error("failed to hash {path}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Invalid ignore pattern
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Test executor failed to start or its output could not be read
    #[error("test executor failed: {message}")]
    Executor { message: String },

    /// File watcher could not be set up
    #[error("watch error: {0}")]
    Watch(String),
}

impl SentinelError {
    /// Map an IO error on `path` to `NotFound` when the file is missing.
    pub(crate) fn from_stat(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SentinelError::NotFound { path: path.into() },
            _ => SentinelError::Io(err),
        }
    }
}

impl From<notify::Error> for SentinelError {
    fn from(err: notify::Error) -> Self {
        SentinelError::Watch(err.to_string())
    }
}
