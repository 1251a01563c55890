// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_core::test_support::job;

#[tokio::test]
async fn register_adds_identity_and_start_time() {
    let ctx = TestContext::new();
    let worker = ctx.registered_worker("jobs").await;

    assert!(worker.registry().exists(worker.identity()).await.unwrap());
    let started = worker.registry().started(worker.identity()).await.unwrap();
    assert_eq!(
        started.map(|t| t.timestamp_millis() as u64),
        Some(ctx.clock.epoch_ms())
    );
}

#[tokio::test]
async fn register_then_unregister_restores_membership() {
    let ctx = TestContext::new();
    let other = identity(HOST, 1, "other");
    ctx.store.sadd("resque:workers", &other.to_string()).await.unwrap();
    let before = ctx.store.smembers("resque:workers").await.unwrap();

    let mut worker = ctx.registered_worker("jobs").await;
    worker.unregister().await.unwrap();

    assert_eq!(ctx.store.smembers("resque:workers").await.unwrap(), before);
    assert!(worker.registry().started(worker.identity()).await.unwrap().is_none());
    assert_eq!(worker.state(), WorkerState::Unregistered);
}

#[tokio::test]
async fn unregister_fails_in_flight_job() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;
    let in_flight = job("jobs", OK_JOB, "abc");
    worker.working_on(&in_flight).await.unwrap();

    worker.unregister().await.unwrap();

    assert_eq!(worker.statistic(stat::FAILED).get().await.unwrap(), 1);
    assert_eq!(ctx.stat("failed").await, 1);
    assert!(worker.registry().working_on(worker.identity()).await.unwrap().is_none());
    assert!(!worker.registry().exists(worker.identity()).await.unwrap());

    let failures = worker.failures().list(0, 10).await.unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].exception, "DirtyExit");
    assert_eq!(failures[0].queue, "jobs");
    assert_eq!(failures[0].worker, worker.identity().to_string());
    assert_eq!(failures[0].payload["id"], "abc");
}

#[tokio::test]
async fn unregister_without_job_reports_nothing() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;
    worker.unregister().await.unwrap();
    assert_eq!(ctx.stat("failed").await, 0);
    assert_eq!(worker.failures().count().await.unwrap(), 0);
}

#[tokio::test]
async fn unregister_discards_unreadable_record() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;
    ctx.store
        .set(&format!("resque:worker:{}", worker.identity()), "garbage")
        .await
        .unwrap();

    worker.unregister().await.unwrap();

    assert!(!worker.registry().exists(worker.identity()).await.unwrap());
    assert_eq!(ctx.stat("failed").await, 0);
}

#[tokio::test]
async fn register_after_unregister_returns_to_idle() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;
    worker.unregister().await.unwrap();
    worker.register().await.unwrap();
    assert_eq!(worker.state(), WorkerState::Idle);
    assert!(worker.registry().exists(worker.identity()).await.unwrap());
}

#[tokio::test]
async fn pause_and_unpause_toggle_flag() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;
    worker.pause_processing().await.unwrap();
    assert!(worker.is_paused().await.unwrap());
    worker.unpause_processing().await.unwrap();
    assert!(!worker.is_paused().await.unwrap());
}

#[tokio::test]
async fn prune_leaves_other_hosts_alone() {
    let ctx = TestContext::new();
    let remote = identity("my.other.host", 1, "jobs");
    ctx.store.sadd("resque:workers", &remote.to_string()).await.unwrap();
    let worker = ctx.registered_worker("jobs").await;

    assert!(worker.prune_dead_workers().await.unwrap().is_empty());
    assert!(worker.registry().exists(&remote).await.unwrap());
}

#[tokio::test]
async fn prune_removes_dead_local_workers_only() {
    let ctx = TestContext::new();
    ctx.process.spawn(77);
    let dead = identity(HOST, 1, "jobs");
    let live = identity(HOST, 77, "jobs");
    for w in [&dead, &live] {
        ctx.store.sadd("resque:workers", &w.to_string()).await.unwrap();
    }
    let worker = ctx.registered_worker("jobs").await;

    let pruned = worker.prune_dead_workers().await.unwrap();

    assert_eq!(pruned, vec![dead.clone()]);
    let mut remaining: Vec<String> = ctx.store.smembers("resque:workers").await.unwrap();
    remaining.sort();
    let mut expected = vec![live.to_string(), worker.identity().to_string()];
    expected.sort();
    assert_eq!(remaining, expected);
}

#[tokio::test]
async fn prune_never_removes_own_identity_even_if_pid_looks_dead() {
    let ctx = TestContext::new();
    let me = identity(HOST, 999, "jobs");
    let mut worker = ctx.worker_with_identity(me.clone());
    worker.register().await.unwrap();

    assert!(worker.prune_dead_workers().await.unwrap().is_empty());
    assert!(worker.registry().exists(&me).await.unwrap());
}

#[tokio::test]
async fn shutdown_unregisters_and_erases_stats() {
    let ctx = TestContext::new();
    ctx.enqueue("jobs", OK_JOB, "1").await;
    let mut worker = ctx.worker("jobs");
    worker.work(&WorkOptions::drain()).await.unwrap();
    assert_eq!(worker.statistic(stat::PROCESSED).get().await.unwrap(), 1);

    worker.shutdown();
    assert_eq!(worker.state(), WorkerState::ShuttingDown);
    worker.work(&WorkOptions::drain()).await.unwrap();

    assert_eq!(worker.state(), WorkerState::Unregistered);
    assert!(!worker.registry().exists(worker.identity()).await.unwrap());
    assert_eq!(worker.statistic(stat::PROCESSED).get().await.unwrap(), 0);
    assert_eq!(worker.statistic(stat::FAILED).get().await.unwrap(), 0);
    // global counters survive
    assert_eq!(ctx.stat("processed").await, 1);
}

#[tokio::test]
async fn shutdown_before_first_work_still_unregisters_cleanly() {
    let ctx = TestContext::new();
    let mut worker = ctx.worker("jobs");
    worker.shutdown();
    let summary = worker.work(&WorkOptions::default()).await.unwrap();
    assert_eq!(summary.processed, 0);
    assert_eq!(worker.state(), WorkerState::Unregistered);
    assert!(ctx.store.smembers("resque:workers").await.unwrap().is_empty());
}

#[tokio::test]
async fn shutdown_handle_stops_long_running_loop() {
    let ctx = TestContext::new();
    let mut worker = ctx.worker("jobs");
    let handle = worker.shutdown_handle();
    let options = WorkOptions {
        interval: Duration::from_millis(5),
        ..WorkOptions::default()
    };

    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.request();
    });
    worker.work(&options).await.unwrap();
    stopper.await.unwrap();

    assert_eq!(worker.state(), WorkerState::Unregistered);
}

#[tokio::test]
async fn work_after_unregister_returns_immediately() {
    let ctx = TestContext::new();
    ctx.enqueue("jobs", OK_JOB, "1").await;
    let mut worker = ctx.registered_worker("jobs").await;
    worker.unregister().await.unwrap();
    ctx.store.clear_calls();

    let summary = worker.work(&WorkOptions::drain()).await.unwrap();

    assert_eq!(summary, WorkSummary::default());
    assert!(ctx.store.calls().is_empty());
}

#[tokio::test]
async fn first_work_prunes_then_registers() {
    let ctx = TestContext::new();
    let dead = identity(HOST, 3, "jobs");
    ctx.store.sadd("resque:workers", &dead.to_string()).await.unwrap();
    let mut worker = ctx.worker("jobs");

    worker.work(&WorkOptions::drain()).await.unwrap();

    assert_eq!(
        ctx.store.smembers("resque:workers").await.unwrap(),
        vec![worker.identity().to_string()]
    );
}
