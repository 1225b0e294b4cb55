//! Base trait for persisted store state.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marker trait for store state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything that is persisted for the store)
/// - Comparable (PartialEq for detecting changes)
pub trait StoreState:
    Clone + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Fixed namespace under which the state is persisted.
    const STORAGE_KEY: &'static str;

    /// Repair a freshly loaded state (merge catalogs, drop duplicates).
    fn normalize(self) -> Self {
        self
    }
}
