//! Time source for store transitions.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of "now" for every timestamp a store writes.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
///
/// With a non-zero `step`, every read returns the current instant and then
/// advances by `step`, so consecutive reads are strictly increasing.
#[derive(Debug)]
pub struct ManualClock {
    inner: Mutex<ManualClockInner>,
}

#[derive(Debug)]
struct ManualClockInner {
    now: DateTime<Utc>,
    step: Duration,
}

impl ManualClock {
    /// A frozen clock that always returns `start` until moved.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::ticking(start, Duration::zero())
    }

    /// A clock that advances by `step` after every read.
    pub fn ticking(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            inner: Mutex::new(ManualClockInner { now: start, step }),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.inner.lock().now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut inner = self.inner.lock();
        let now = inner.now;
        inner.now = now + inner.step;
        now
    }
}
