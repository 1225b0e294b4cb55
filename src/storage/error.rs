use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing persisted state.
///
/// None of these invalidate the in-memory state of a store: a failed write
/// only means the change may not survive a restart.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode state for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored state for '{key}' is corrupt: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored state for '{key}' has version {found}, this build supports up to {supported}")]
    UnsupportedVersion {
        key: String,
        found: u32,
        supported: u32,
    },

    #[error("Invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}
