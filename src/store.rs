//! Generic persisted store.
//!
//! Holds the current snapshot of one reducer's state behind an `Arc`, so a
//! consumer can keep the snapshot it rendered from and compare it with
//! [`Arc::ptr_eq`] or [`Store::revision`] to detect changes.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::clock::Clock;
use crate::mvi::{Reducer, StoreState};
use crate::storage::{load_state, save_state, KeyValueStorage, StorageError};

/// Result of a dispatched intent.
///
/// The in-memory transition has always happened by the time this is
/// returned. `persist_error` is set when the new state could not be written,
/// in which case the change will not survive a restart.
#[derive(Debug)]
#[must_use = "check persist_error to warn about unsaved changes"]
pub struct Committed<T> {
    value: T,
    persist_error: Option<StorageError>,
}

impl<T> Committed<T> {
    pub(crate) fn new(value: T, persist_error: Option<StorageError>) -> Self {
        Self {
            value,
            persist_error,
        }
    }

    /// Output of an intent that wrote nothing.
    pub(crate) fn unchanged(value: T) -> Self {
        Self::new(value, None)
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn persist_error(&self) -> Option<&StorageError> {
        self.persist_error.as_ref()
    }

    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    /// Drop the persistence status and keep the output.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Split into the output and the persistence status.
    pub fn into_parts(self) -> (T, Option<StorageError>) {
        (self.value, self.persist_error)
    }

    /// Treat a failed write as an error.
    pub fn into_result(self) -> Result<T, StorageError> {
        match self.persist_error {
            None => Ok(self.value),
            Some(e) => Err(e),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Committed<U> {
        Committed::new(f(self.value), self.persist_error)
    }
}

/// A reducer's state plus the storage it is persisted to.
pub struct Store<R: Reducer> {
    state: Arc<R::State>,
    revision: u64,
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> Store<R> {
    /// Load the store from `storage`, starting from the default state when
    /// nothing was persisted yet.
    pub fn open(
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StorageError> {
        let key = R::State::STORAGE_KEY;
        let loaded: Option<R::State> = load_state(storage.as_ref(), key)?;
        let fresh = loaded.is_none();
        let state = loaded.unwrap_or_default().normalize();

        tracing::debug!(key, fresh, "Store opened");

        Ok(Self {
            state: Arc::new(state),
            revision: 0,
            storage,
            clock,
            _reducer: PhantomData,
        })
    }

    /// Borrow the current state.
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<R::State> {
        Arc::clone(&self.state)
    }

    /// Number of state changes since the store was opened.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Run `intent` through the reducer.
    ///
    /// When the resulting state equals the current one nothing is swapped or
    /// written; otherwise the new snapshot replaces the old one and is
    /// persisted immediately.
    pub fn dispatch(&mut self, intent: R::Intent) -> Committed<R::Output> {
        let (next, value) = R::reduce(&self.state, intent, self.clock.as_ref());

        if next == *self.state {
            return Committed::unchanged(value);
        }

        self.state = Arc::new(next);
        self.revision += 1;

        let key = R::State::STORAGE_KEY;
        let persist_error = match save_state(self.storage.as_ref(), key, &*self.state) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to persist state");
                Some(e)
            }
        };

        Committed::new(value, persist_error)
    }

    /// Write the current state regardless of whether it changed.
    pub fn flush(&self) -> Result<(), StorageError> {
        save_state(
            self.storage.as_ref(),
            R::State::STORAGE_KEY,
            &*self.state,
        )
    }
}
