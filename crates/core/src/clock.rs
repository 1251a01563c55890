// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time source abstraction.
//!
//! Worker start times, working-on records and failure reports are stamped
//! through a [`Clock`] so tests can pin wall-clock values.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Source of monotonic and wall-clock time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic instant, for measuring elapsed time.
    fn now(&self) -> Instant;

    /// Milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64;
}

/// Clock backed by the operating system
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

struct FakeClockState {
    now: Instant,
    epoch_ms: u64,
}

/// Manually advanced clock for tests.
///
/// Clones share the same underlying time.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeClockState>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeClock {
    /// Starts at 2026-01-01T00:00:00Z.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeClockState {
                now: Instant::now(),
                epoch_ms: 1_767_225_600_000,
            })),
        }
    }

    /// Move both the monotonic and wall clock forward.
    pub fn advance(&self, by: Duration) {
        let mut state = self.inner.lock();
        state.now += by;
        state.epoch_ms += by.as_millis() as u64;
    }

    pub fn set_epoch_ms(&self, epoch_ms: u64) {
        self.inner.lock().epoch_ms = epoch_ms;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().now
    }

    fn epoch_ms(&self) -> u64 {
        self.inner.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
