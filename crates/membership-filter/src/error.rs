//! Error types for the membership filter

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or querying a filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    #[error("Remote store error: {0}")]
    Transport(#[from] StoreError),

    #[error("Bit index {index} out of bounds for capacity {capacity}")]
    IndexOutOfBounds { index: u64, capacity: u64 },
}

impl FilterError {
    /// Attach the offending path to a storage failure
    pub(crate) fn storage(path: impl Into<PathBuf>, source: StorageError) -> Self {
        FilterError::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Failures reading or writing the durable bit snapshot
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Compression error: {0}")]
    Compression(io::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Snapshot holds {stored} bits, filter expects {expected}")]
    CapacityMismatch { stored: u64, expected: u64 },
}

/// Errors from the remote list store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("{command} failed: {message}")]
    CommandFailed { command: &'static str, message: String },

    #[error("No element at {key}[{index}]")]
    MissingElement { key: String, index: u64 },

    #[error("Index {index} out of range for {key} (len {len})")]
    IndexOutOfRange { key: String, index: u64, len: u64 },
}
