// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker: a long-running loop that reserves jobs from its queues and
//! performs them one at a time.
//!
//! ```text
//!  Idle ──reserve──▶ WaitingOnQueues ──job──▶ WorkingOnJob ──done──▶ Idle
//!   │                      │ none                                      ▲
//!   │                      └───────────────────────────────────────────┘
//!   ├── pause flag set ──▶ Paused ── flag cleared ──▶ Idle
//!   └── shutdown() ──▶ ShuttingDown ── unregister ──▶ Unregistered
//! ```

mod lifecycle;
mod perform;
mod reserve;

use crate::env;
use crate::failure::FailureLog;
use crate::performer::JobPerformer;
use crate::queue::QueueRegistry;
use crate::registry::WorkerRegistry;
use crate::stat::{self, Statistic};
use resq_adapters::{ProcessAdapter, StoreAdapter};
use resq_core::{Clock, Keys, QueueList, WorkerIdentity};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Poll interval when nothing overrides it.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Where the worker is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    WaitingOnQueues,
    WorkingOnJob,
    Paused,
    ShuttingDown,
    Unregistered,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::WaitingOnQueues => "waiting",
            Self::WorkingOnJob => "working",
            Self::Paused => "paused",
            Self::ShuttingDown => "shutting-down",
            Self::Unregistered => "unregistered",
        };
        f.write_str(s)
    }
}

/// Settings for one call to [`Worker::work`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOptions {
    /// Sleep between empty polls. Zero means drain: return as soon as a poll
    /// finds nothing or the worker is paused.
    pub interval: Duration,
    /// Wait on all queues at once instead of sleeping between polls.
    pub blocking: bool,
    /// Upper bound on one blocking wait.
    pub timeout: Duration,
    /// Stop after this many loop iterations.
    pub max_iterations: Option<u64>,
}

impl Default for WorkOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            blocking: false,
            timeout: DEFAULT_INTERVAL,
            max_iterations: None,
        }
    }
}

impl WorkOptions {
    /// Process everything currently queued, then return.
    pub fn drain() -> Self {
        Self {
            interval: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Defaults overridden by `RESQ_INTERVAL_MS` and `RESQ_BLOCKING`.
    /// The blocking timeout follows the interval unless that is zero.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(interval) = env::interval() {
            options.interval = interval;
            if !interval.is_zero() {
                options.timeout = interval;
            }
        }
        if let Some(blocking) = env::blocking() {
            options.blocking = blocking;
        }
        options
    }

    pub fn is_drain(&self) -> bool {
        self.interval.is_zero()
    }
}

/// Counts from one call to [`Worker::work`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkSummary {
    pub iterations: u64,
    pub processed: u64,
    pub failed: u64,
}

/// Cross-task shutdown request flag.
///
/// Cloned into signal handlers; the work loop checks it once per iteration.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Worker adapter dependencies
pub struct WorkerDeps<S, P, J> {
    pub store: S,
    pub process: P,
    pub performer: J,
}

pub struct Worker<S, P, J, C: Clock> {
    identity: WorkerIdentity,
    keys: Keys,
    store: S,
    process: P,
    performer: J,
    clock: C,
    queues: QueueRegistry<S>,
    registry: WorkerRegistry<S>,
    failures: FailureLog<S>,
    state: WorkerState,
    started: bool,
    shutdown: ShutdownHandle,
}

impl<S, P, J, C> Worker<S, P, J, C>
where
    S: StoreAdapter,
    P: ProcessAdapter,
    J: JobPerformer,
    C: Clock,
{
    /// Worker on this host and pid polling `queues`.
    pub fn new(deps: WorkerDeps<S, P, J>, queues: QueueList, keys: Keys, clock: C) -> Self {
        let identity = WorkerIdentity::new(deps.process.hostname(), deps.process.pid(), queues);
        Self::with_identity(deps, identity, keys, clock)
    }

    /// Worker with an explicit identity.
    pub fn with_identity(
        deps: WorkerDeps<S, P, J>,
        identity: WorkerIdentity,
        keys: Keys,
        clock: C,
    ) -> Self {
        Self {
            queues: QueueRegistry::new(deps.store.clone(), keys.clone()),
            registry: WorkerRegistry::new(deps.store.clone(), keys.clone()),
            failures: FailureLog::new(deps.store.clone(), keys.clone()),
            identity,
            keys,
            store: deps.store,
            process: deps.process,
            performer: deps.performer,
            clock,
            state: WorkerState::Idle,
            started: false,
            shutdown: ShutdownHandle::default(),
        }
    }

    pub fn identity(&self) -> &WorkerIdentity {
        &self.identity
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handle that requests shutdown from another task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn registry(&self) -> &WorkerRegistry<S> {
        &self.registry
    }

    pub fn queue_registry(&self) -> &QueueRegistry<S> {
        &self.queues
    }

    pub fn failures(&self) -> &FailureLog<S> {
        &self.failures
    }

    /// This worker's share of a statistic: `<name>:<identity>`.
    pub fn statistic(&self, name: &str) -> Statistic<S> {
        Statistic::new(
            self.store.clone(),
            &self.keys,
            stat::worker_stat(name, &self.identity),
        )
    }

    /// Global statistic shared by every worker.
    pub fn global_statistic(&self, name: &str) -> Statistic<S> {
        Statistic::new(self.store.clone(), &self.keys, name)
    }
}

impl<S, P, J, C: Clock> fmt::Display for Worker<S, P, J, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}

#[cfg(test)]
#[path = "../worker_tests/mod.rs"]
mod tests;
