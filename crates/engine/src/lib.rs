// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! resq worker engine: queues, the worker registry, statistics and the
//! worker loop

mod command;
pub mod env;
mod error;
mod failure;
mod performer;
mod queue;
mod registry;
pub mod stat;
mod worker;

#[cfg(test)]
mod test_helpers;

pub use command::{CommandPerformer, PerformerConfigError};
pub use error::EngineError;
pub use failure::FailureLog;
pub use performer::{HandlerRegistry, JobError, JobHandler, JobPerformer};
pub use queue::{validate_queue_name, QueueRegistry};
pub use registry::WorkerRegistry;
pub use stat::Statistic;
pub use worker::{
    ShutdownHandle, WorkOptions, WorkSummary, Worker, WorkerDeps, WorkerState, DEFAULT_INTERVAL,
};
