//! Storage error types.
//!
//! None of these reach the user: the application logs them and falls back
//! to default values.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing persisted values.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No usable data directory could be determined.
    #[error("Failed to determine data directory")]
    DataDirNotFound,

    /// Filesystem access failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// Storage key
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A stored value is not valid JSON or has the wrong shape.
    #[error("Malformed value for key '{key}': {source}")]
    Malformed {
        /// Storage key
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters that cannot be used as a file name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    /// Returns true if the stored data itself is bad (as opposed to I/O).
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
