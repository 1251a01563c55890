// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, Payload, QueueList, WorkerIdentity};

/// Handler class that test performers treat as succeeding.
pub const OK_JOB: &str = "Test\\Job";

/// Handler class that test performers treat as failing.
pub const FAILING_JOB: &str = "Test\\FailingJob";

pub fn payload(class: &str, id: &str) -> Payload {
    Payload::new(class).with_id(id)
}

pub fn job(queue: &str, class: &str, id: &str) -> Job {
    Job::new(queue, payload(class, id))
}

/// Identity on `host` with pid and comma-joined queue list.
pub fn identity(host: &str, pid: u32, queues: &str) -> WorkerIdentity {
    WorkerIdentity::new(host, pid, QueueList::parse(queues))
}
