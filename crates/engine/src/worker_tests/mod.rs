// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker tests

mod lifecycle;
mod perform;
mod reserve;

use super::*;
use crate::test_helpers::{TestContext, HOST, PID};
use resq_adapters::StoreAdapter;
use resq_core::test_support::{identity, FAILING_JOB, OK_JOB};

#[test]
fn identity_comes_from_process_adapter() {
    let ctx = TestContext::new();
    let worker = ctx.worker("high,low");
    assert_eq!(worker.identity().to_string(), format!("{HOST}:{PID}:high,low"));
    assert_eq!(worker.to_string(), worker.identity().to_string());
    assert_eq!(worker.state(), WorkerState::Idle);
}

#[test]
fn drain_options_have_zero_interval() {
    let options = WorkOptions::drain();
    assert!(options.is_drain());
    assert!(!WorkOptions::default().is_drain());
    assert_eq!(WorkOptions::default().interval, DEFAULT_INTERVAL);
}

#[test]
#[serial_test::serial]
fn options_from_env() {
    std::env::set_var("RESQ_INTERVAL_MS", "1500");
    std::env::set_var("RESQ_BLOCKING", "yes");
    let options = WorkOptions::from_env();
    assert_eq!(options.interval, Duration::from_millis(1500));
    assert_eq!(options.timeout, Duration::from_millis(1500));
    assert!(options.blocking);

    std::env::set_var("RESQ_INTERVAL_MS", "0");
    std::env::remove_var("RESQ_BLOCKING");
    let options = WorkOptions::from_env();
    assert!(options.is_drain());
    assert_eq!(options.timeout, DEFAULT_INTERVAL);
    assert!(!options.blocking);
    std::env::remove_var("RESQ_INTERVAL_MS");
}

#[yare::parameterized(
    idle = { WorkerState::Idle, "idle" },
    waiting = { WorkerState::WaitingOnQueues, "waiting" },
    working = { WorkerState::WorkingOnJob, "working" },
    paused = { WorkerState::Paused, "paused" },
    shutting_down = { WorkerState::ShuttingDown, "shutting-down" },
    unregistered = { WorkerState::Unregistered, "unregistered" },
)]
fn state_display(state: WorkerState, expected: &str) {
    assert_eq!(state.to_string(), expected);
}

#[test]
fn shutdown_handle_is_shared() {
    let ctx = TestContext::new();
    let worker = ctx.worker("jobs");
    let handle = worker.shutdown_handle();
    assert!(!worker.shutdown_handle().is_requested());
    handle.request();
    assert!(worker.shutdown_handle().is_requested());
}

#[tokio::test]
async fn statistic_reads_per_worker_counter() {
    let ctx = TestContext::new();
    let worker = ctx.worker("jobs");
    ctx.store
        .incr_by(&format!("resque:stat:processed:{}", worker.identity()), 3)
        .await
        .unwrap();
    assert_eq!(worker.statistic(stat::PROCESSED).get().await.unwrap(), 3);
    assert_eq!(worker.global_statistic(stat::PROCESSED).get().await.unwrap(), 0);
}
