// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_core::test_support::job;

#[tokio::test]
async fn successful_job_counts_as_processed() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;

    assert!(worker.perform(&job("jobs", OK_JOB, "1")).await.unwrap());

    assert_eq!(worker.statistic(stat::PROCESSED).get().await.unwrap(), 1);
    assert_eq!(worker.statistic(stat::FAILED).get().await.unwrap(), 0);
    assert_eq!(ctx.stat("processed").await, 1);
    assert!(worker.registry().working_on(worker.identity()).await.unwrap().is_none());
    assert_eq!(worker.state(), WorkerState::Idle);
}

#[tokio::test]
async fn failing_job_counts_as_processed_and_failed() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;

    assert!(!worker.perform(&job("jobs", FAILING_JOB, "1")).await.unwrap());

    assert_eq!(worker.statistic(stat::PROCESSED).get().await.unwrap(), 1);
    assert_eq!(worker.statistic(stat::FAILED).get().await.unwrap(), 1);
    assert_eq!(ctx.stat("failed").await, 1);
    let failures = worker.failures().list(0, 10).await.unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].exception, "JobFailed");
    assert_eq!(failures[0].error, "job failed on purpose");
    assert!(worker.registry().working_on(worker.identity()).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_class_is_a_handled_failure() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;

    assert!(!worker.perform(&job("jobs", "Missing\\Job", "1")).await.unwrap());

    let failures = worker.failures().list(0, 10).await.unwrap();
    assert_eq!(failures[0].exception, "HandlerNotFound");
    assert_eq!(worker.statistic(stat::FAILED).get().await.unwrap(), 1);
}

#[tokio::test]
async fn working_on_record_is_written_before_the_handler_runs() {
    let ctx = TestContext::new();
    ctx.enqueue("jobs", OK_JOB, "1").await;
    let mut worker = ctx.worker("jobs");
    worker.work(&WorkOptions::drain()).await.unwrap();

    let commands: Vec<(&str, String)> = ctx
        .store
        .calls()
        .into_iter()
        .filter(|c| matches!(c.command, "set" | "del"))
        .filter(|c| c.keys.iter().any(|k| k == &format!("resque:worker:{}", worker.identity())))
        .map(|c| (c.command, c.keys[0].clone()))
        .collect();
    let key = format!("resque:worker:{}", worker.identity());
    assert_eq!(commands, vec![("set", key.clone()), ("del", key)]);
}

#[tokio::test]
async fn drain_processes_everything_then_returns() {
    let ctx = TestContext::new();
    ctx.enqueue("jobs", OK_JOB, "1").await;
    ctx.enqueue("jobs", FAILING_JOB, "2").await;
    ctx.enqueue("jobs", OK_JOB, "3").await;
    let mut worker = ctx.worker("jobs");

    let summary = worker.work(&WorkOptions::drain()).await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(ctx.queues.length("jobs").await.unwrap(), 0);
    assert_eq!(worker.statistic(stat::PROCESSED).get().await.unwrap(), 3);
    assert_eq!(worker.statistic(stat::FAILED).get().await.unwrap(), 1);
    assert!(worker.registry().exists(worker.identity()).await.unwrap());
}

#[tokio::test]
async fn drain_on_empty_queues_returns_without_touching_stats() {
    let ctx = TestContext::new();
    let mut worker = ctx.worker("jobs");

    let summary = worker.work(&WorkOptions::drain()).await.unwrap();

    assert_eq!(summary.iterations, 1);
    assert_eq!(ctx.store.call_count("incrby"), 0);
    assert_eq!(ctx.store.call_count("blpop"), 0);
    assert_eq!(worker.state(), WorkerState::Idle);
}

#[tokio::test]
async fn paused_worker_reserves_nothing() {
    let ctx = TestContext::new();
    ctx.enqueue("jobs", OK_JOB, "1").await;
    let mut worker = ctx.registered_worker("jobs").await;
    worker.pause_processing().await.unwrap();

    let summary = worker.work(&WorkOptions::drain()).await.unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(ctx.store.call_count("lpop"), 0);
    assert_eq!(ctx.stat("processed").await, 0);
    assert_eq!(worker.state(), WorkerState::Paused);

    worker.unpause_processing().await.unwrap();
    let summary = worker.work(&WorkOptions::drain()).await.unwrap();
    assert_eq!(summary.processed, 1);
}

#[tokio::test]
async fn paused_worker_sleeps_between_checks_when_not_draining() {
    let ctx = TestContext::new();
    let mut worker = ctx.registered_worker("jobs").await;
    worker.pause_processing().await.unwrap();
    let options = WorkOptions {
        interval: Duration::from_millis(1),
        max_iterations: Some(3),
        ..WorkOptions::default()
    };

    let summary = worker.work(&options).await.unwrap();

    assert_eq!(summary.iterations, 3);
    assert_eq!(ctx.store.call_count("lpop"), 0);
}

#[tokio::test]
async fn external_pause_flag_is_honoured() {
    let ctx = TestContext::new();
    ctx.enqueue("jobs", OK_JOB, "1").await;
    let mut worker = ctx.registered_worker("jobs").await;
    ctx.store
        .set(&format!("resque:worker:{}:paused", worker.identity()), "1")
        .await
        .unwrap();

    let summary = worker.work(&WorkOptions::drain()).await.unwrap();
    assert_eq!(summary.processed, 0);
    assert_eq!(ctx.queues.length("jobs").await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_payload_becomes_failure_and_loop_continues() {
    let ctx = TestContext::new();
    ctx.store.sadd("resque:queues", "jobs").await.unwrap();
    ctx.store.rpush("resque:queue:jobs", "{broken").await.unwrap();
    ctx.enqueue("jobs", OK_JOB, "good").await;
    let mut worker = ctx.worker("jobs");

    let summary = worker.work(&WorkOptions::drain()).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    let failures = worker.failures().list(0, 10).await.unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].exception, "MalformedPayload");
    assert_eq!(failures[0].payload, serde_json::Value::String("{broken".into()));
    assert_eq!(worker.statistic(stat::FAILED).get().await.unwrap(), 1);
}

#[tokio::test]
async fn max_iterations_bounds_the_loop() {
    let ctx = TestContext::new();
    for i in 0..5 {
        ctx.enqueue("jobs", OK_JOB, &i.to_string()).await;
    }
    let mut worker = ctx.worker("jobs");
    let options = WorkOptions {
        max_iterations: Some(2),
        ..WorkOptions::drain()
    };

    let summary = worker.work(&options).await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(ctx.queues.length("jobs").await.unwrap(), 3);
}

#[tokio::test]
async fn blocking_loop_picks_up_late_job() {
    let ctx = TestContext::new();
    let mut worker = ctx.worker("jobs");
    let queues = ctx.queues.clone();
    let options = WorkOptions {
        interval: Duration::from_millis(10),
        blocking: true,
        timeout: Duration::from_millis(200),
        max_iterations: Some(1),
    };

    let producer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        queues
            .enqueue("jobs", resq_core::test_support::payload(OK_JOB, "late"))
            .await
            .unwrap();
    });
    let summary = worker.work(&options).await.unwrap();
    producer.await.unwrap();

    assert_eq!(summary.processed, 1);
}

#[tokio::test]
async fn blocking_wildcard_loop_without_queues_paces_itself() {
    let ctx = TestContext::new();
    let mut worker = ctx.worker("*");
    let options = WorkOptions {
        interval: Duration::from_secs(5),
        blocking: true,
        timeout: Duration::from_millis(30),
        max_iterations: Some(3),
    };

    let start = std::time::Instant::now();
    let summary = worker.work(&options).await.unwrap();

    assert_eq!(summary.iterations, 3);
    assert_eq!(summary.processed, 0);
    assert!(start.elapsed() >= Duration::from_millis(90));
    assert_eq!(ctx.store.call_count("blpop"), 0);
}

#[tokio::test]
async fn separate_workers_keep_separate_counters() {
    let ctx = TestContext::new();
    ctx.process.spawn(1);
    let mut a = ctx.worker_with_identity(identity(HOST, PID, "jobs"));
    let mut b = ctx.worker_with_identity(identity(HOST, 1, "jobs"));
    a.register().await.unwrap();
    b.register().await.unwrap();

    a.perform(&job("jobs", OK_JOB, "1")).await.unwrap();
    b.perform(&job("jobs", FAILING_JOB, "2")).await.unwrap();
    b.perform(&job("jobs", OK_JOB, "3")).await.unwrap();

    assert_eq!(a.statistic(stat::PROCESSED).get().await.unwrap(), 1);
    assert_eq!(b.statistic(stat::PROCESSED).get().await.unwrap(), 2);
    assert_eq!(b.statistic(stat::FAILED).get().await.unwrap(), 1);
    assert_eq!(ctx.stat("processed").await, 3);
    assert_eq!(ctx.stat("failed").await, 1);
}
