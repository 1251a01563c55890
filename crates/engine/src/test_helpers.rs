// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{HandlerRegistry, JobError, QueueRegistry, Worker, WorkerDeps};
use resq_adapters::{FakeProcessAdapter, FakeStore, StoreAdapter};
use resq_core::test_support::{payload, FAILING_JOB, OK_JOB};
use resq_core::{FakeClock, Job, Keys, QueueList, SequentialIdGen, WorkerIdentity};

/// Convenience alias for the fully-typed test worker.
pub(crate) type TestWorker = Worker<FakeStore, FakeProcessAdapter, HandlerRegistry, FakeClock>;

/// Host the fake process table reports as local.
pub(crate) const HOST: &str = "test-host";

/// Pid of the fake "current process".
pub(crate) const PID: u32 = 4242;

/// Performer where [`OK_JOB`] succeeds and [`FAILING_JOB`] fails.
pub(crate) fn test_performer() -> HandlerRegistry {
    HandlerRegistry::new()
        .register_fn(OK_JOB, |_| Ok(()))
        .register_fn(FAILING_JOB, |_| Err(JobError::failed("job failed on purpose")))
}

/// Shared fake store, process table and clock for building workers.
pub(crate) struct TestContext {
    pub store: FakeStore,
    pub process: FakeProcessAdapter,
    pub clock: FakeClock,
    pub keys: Keys,
    pub queues: QueueRegistry<FakeStore, SequentialIdGen>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = FakeStore::new();
        let keys = Keys::default();
        Self {
            queues: QueueRegistry::with_id_gen(
                store.clone(),
                keys.clone(),
                SequentialIdGen::default(),
            ),
            store,
            process: FakeProcessAdapter::new(HOST, PID),
            clock: FakeClock::new(),
            keys,
        }
    }

    fn deps(&self) -> WorkerDeps<FakeStore, FakeProcessAdapter, HandlerRegistry> {
        WorkerDeps {
            store: self.store.clone(),
            process: self.process.clone(),
            performer: test_performer(),
        }
    }

    /// Unregistered worker for this process polling `queues` (comma-joined).
    pub fn worker(&self, queues: &str) -> TestWorker {
        Worker::new(
            self.deps(),
            QueueList::parse(queues),
            self.keys.clone(),
            self.clock.clone(),
        )
    }

    /// Unregistered worker with an explicit identity.
    pub fn worker_with_identity(&self, identity: WorkerIdentity) -> TestWorker {
        Worker::with_identity(self.deps(), identity, self.keys.clone(), self.clock.clone())
    }

    /// Registered worker for this process polling `queues`.
    pub async fn registered_worker(&self, queues: &str) -> TestWorker {
        let mut worker = self.worker(queues);
        worker.register().await.unwrap();
        worker
    }

    pub async fn enqueue(&self, queue: &str, class: &str, id: &str) -> Job {
        self.queues.enqueue(queue, payload(class, id)).await.unwrap()
    }

    pub async fn stat(&self, key: &str) -> i64 {
        self.store
            .get(&self.keys.stat(key))
            .await
            .unwrap()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
