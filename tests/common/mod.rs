//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use knit_counter::clock::ManualClock;
use knit_counter::storage::{KeyValueStorage, MemoryStorage, StorageError};
use knit_counter::Knitbook;

/// Fixed instant all test clocks start from.
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 2, 19, 30, 0).unwrap()
}

/// Clock that moves one second forward on every read.
pub fn ticking_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::ticking(start(), Duration::seconds(1)))
}

/// Clock that never moves unless told to.
pub fn frozen_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start()))
}

/// Knitbook over in-memory storage with a ticking clock.
pub fn memory_book() -> (Arc<MemoryStorage>, Knitbook) {
    let storage = Arc::new(MemoryStorage::new());
    let book = Knitbook::open(storage.clone(), ticking_clock()).expect("open knitbook");
    (storage, book)
}

/// Storage whose writes can be switched off to simulate a full disk.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                message: "quota exceeded".to_string(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
