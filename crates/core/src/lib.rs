// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! resq-core: data types shared by the resq worker, adapters and CLI

pub mod clock;
pub mod failure;
pub mod id;
pub mod job;
pub mod keys;
pub mod queue;
pub mod time_fmt;
pub mod worker;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use failure::FailureRecord;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use job::{Job, JobId, Payload, WorkingOn};
pub use keys::{Keys, DEFAULT_PREFIX};
pub use queue::{QueueList, WILDCARD};
pub use time_fmt::{format_elapsed, format_utc, utc_from_epoch_ms};
pub use worker::{IdentityError, WorkerIdentity};
