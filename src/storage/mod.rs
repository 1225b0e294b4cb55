//! Device-local key/value persistence.
//!
//! Every store writes its whole state under one fixed key. The value is a
//! JSON envelope `{"state": ..., "version": N}` so that old records can be
//! recognised once the layout changes.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Layout version written by this build.
pub const STATE_VERSION: u32 = 0;

/// Minimal string key/value store, the moral equivalent of `localStorage`.
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value under `key`; `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Forget `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, S> {
    state: &'a S,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

/// Load and decode the state stored under `key`.
pub fn load_state<S: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<S>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    let envelope: Envelope<S> =
        serde_json::from_str(&raw).map_err(|e| StorageError::Decode {
            key: key.to_string(),
            source: e,
        })?;

    if envelope.version > STATE_VERSION {
        return Err(StorageError::UnsupportedVersion {
            key: key.to_string(),
            found: envelope.version,
            supported: STATE_VERSION,
        });
    }

    Ok(Some(envelope.state))
}

/// Encode `state` and write it under `key`.
pub fn save_state<S: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    state: &S,
) -> Result<(), StorageError> {
    let envelope = EnvelopeRef {
        state,
        version: STATE_VERSION,
    };
    let raw = serde_json::to_string(&envelope).map_err(|e| StorageError::Encode {
        key: key.to_string(),
        source: e,
    })?;
    storage.set(key, &raw)
}
