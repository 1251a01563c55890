// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ProcessAdapter;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

struct FakeProcessState {
    hostname: String,
    pid: u32,
    alive: HashSet<u32>,
}

/// Fake process adapter for testing.
///
/// Only the adapter's own pid and pids passed to [`FakeProcessAdapter::spawn`]
/// are alive.
#[derive(Clone)]
pub struct FakeProcessAdapter {
    inner: Arc<Mutex<FakeProcessState>>,
}

impl FakeProcessAdapter {
    pub fn new(hostname: impl Into<String>, pid: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProcessState {
                hostname: hostname.into(),
                pid,
                alive: HashSet::from([pid]),
            })),
        }
    }

    /// Mark a pid as running
    pub fn spawn(&self, pid: u32) {
        self.inner.lock().alive.insert(pid);
    }

    /// Mark a pid as exited
    pub fn kill(&self, pid: u32) {
        self.inner.lock().alive.remove(&pid);
    }
}

impl Default for FakeProcessAdapter {
    fn default() -> Self {
        Self::new("test-host", 4242)
    }
}

impl ProcessAdapter for FakeProcessAdapter {
    fn hostname(&self) -> String {
        self.inner.lock().hostname.clone()
    }

    fn pid(&self) -> u32 {
        self.inner.lock().pid
    }

    fn is_alive(&self, pid: u32) -> bool {
        self.inner.lock().alive.contains(&pid)
    }
}
