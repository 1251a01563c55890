// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

async fn reserved_queue(worker: &crate::test_helpers::TestWorker) -> Option<String> {
    worker
        .reserve(false, Duration::ZERO)
        .await
        .unwrap()
        .map(|job| job.queue)
}

#[tokio::test]
async fn reserves_in_configured_priority_order() {
    let ctx = TestContext::new();
    ctx.enqueue("low", OK_JOB, "l").await;
    ctx.enqueue("high", OK_JOB, "h").await;
    ctx.enqueue("medium", OK_JOB, "m").await;
    let worker = ctx.registered_worker("high,medium,low").await;

    assert_eq!(reserved_queue(&worker).await.as_deref(), Some("high"));
    assert_eq!(reserved_queue(&worker).await.as_deref(), Some("medium"));
    assert_eq!(reserved_queue(&worker).await.as_deref(), Some("low"));
    assert_eq!(reserved_queue(&worker).await, None);
}

#[tokio::test]
async fn wildcard_follows_known_queue_order() {
    let ctx = TestContext::new();
    ctx.enqueue("queue1", OK_JOB, "1").await;
    ctx.enqueue("queue2", OK_JOB, "2").await;
    let worker = ctx.registered_worker("*").await;

    let first = worker.reserve(false, Duration::ZERO).await.unwrap().unwrap();
    let second = worker.reserve(false, Duration::ZERO).await.unwrap().unwrap();

    assert_eq!((first.queue.as_str(), first.log_id()), ("queue1", "1"));
    assert_eq!((second.queue.as_str(), second.log_id()), ("queue2", "2"));
}

#[tokio::test]
async fn wildcard_sees_queues_created_after_start() {
    let ctx = TestContext::new();
    let worker = ctx.registered_worker("*").await;
    assert_eq!(reserved_queue(&worker).await, None);

    ctx.enqueue("late", OK_JOB, "1").await;
    assert_eq!(reserved_queue(&worker).await.as_deref(), Some("late"));
}

#[tokio::test]
async fn unrelated_queues_yield_nothing() {
    let ctx = TestContext::new();
    ctx.enqueue("other", OK_JOB, "1").await;
    let worker = ctx.registered_worker("jobs").await;

    assert_eq!(reserved_queue(&worker).await, None);
    assert_eq!(ctx.queues.length("other").await.unwrap(), 1);
}

#[tokio::test]
async fn empty_queue_list_yields_nothing() {
    let ctx = TestContext::new();
    let worker = ctx.worker("");
    assert_eq!(reserved_queue(&worker).await, None);
    assert_eq!(ctx.store.call_count("lpop"), 0);
}

#[tokio::test]
async fn blocking_reserve_waits_for_a_push() {
    let ctx = TestContext::new();
    let worker = ctx.registered_worker("high,low").await;
    let queues = ctx.queues.clone();

    let producer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        queues
            .enqueue("low", resq_core::test_support::payload(OK_JOB, "late"))
            .await
            .unwrap();
    });
    let job = worker
        .reserve(true, Duration::from_secs(2))
        .await
        .unwrap()
        .unwrap();
    producer.await.unwrap();

    assert_eq!(job.queue, "low");
    assert_eq!(job.log_id(), "late");
}

#[tokio::test]
async fn blocking_reserve_times_out() {
    let ctx = TestContext::new();
    let worker = ctx.registered_worker("jobs").await;
    let job = worker
        .reserve(true, Duration::from_millis(20))
        .await
        .unwrap();
    assert!(job.is_none());
    assert_eq!(ctx.store.call_count("blpop"), 1);
}

#[tokio::test]
async fn blocking_reserve_without_queues_waits_out_the_timeout() {
    let ctx = TestContext::new();
    let worker = ctx.registered_worker("*").await;

    let start = std::time::Instant::now();
    let job = worker
        .reserve(true, Duration::from_millis(50))
        .await
        .unwrap();

    assert!(job.is_none());
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert_eq!(ctx.store.call_count("blpop"), 0);
}

#[tokio::test]
async fn blocking_reserve_with_zero_timeout_does_not_wait() {
    let ctx = TestContext::new();
    let worker = ctx.registered_worker("jobs").await;
    let job = worker.reserve(true, Duration::ZERO).await.unwrap();
    assert!(job.is_none());
    assert_eq!(ctx.store.call_count("blpop"), 0);
}

#[tokio::test]
async fn non_blocking_reserve_never_waits() {
    let ctx = TestContext::new();
    let worker = ctx.registered_worker("a,b").await;
    assert_eq!(reserved_queue(&worker).await, None);
    assert_eq!(ctx.store.call_count("lpop"), 2);
    assert_eq!(ctx.store.call_count("blpop"), 0);
}

#[tokio::test]
async fn concurrent_workers_never_share_a_job() {
    let ctx = TestContext::new();
    for i in 0..50 {
        ctx.enqueue("jobs", OK_JOB, &i.to_string()).await;
    }
    let mut tasks = Vec::new();
    for pid in 1..=4 {
        ctx.process.spawn(pid);
        let worker = ctx.worker_with_identity(identity(HOST, pid, "jobs"));
        tasks.push(tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Some(job) = worker.reserve(false, Duration::ZERO).await.unwrap() {
                seen.push(job.log_id().to_string());
                tokio::task::yield_now().await;
            }
            seen
        }));
    }
    let mut all = Vec::new();
    for task in tasks {
        all.extend(task.await.unwrap());
    }
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 50);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn reserve_drains_queues_in_priority_order(counts in proptest::collection::vec(0usize..4, 1..5)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let ctx = TestContext::new();
            let names: Vec<String> = (0..counts.len()).map(|i| format!("q{i}")).collect();
            // enqueue back to front so insertion order never matches priority
            for (name, count) in names.iter().zip(&counts).rev() {
                for n in 0..*count {
                    ctx.enqueue(name, OK_JOB, &format!("{name}-{n}")).await;
                }
            }
            let worker = ctx.registered_worker(&names.join(",")).await;

            let mut expected = Vec::new();
            for (name, count) in names.iter().zip(&counts) {
                for n in 0..*count {
                    expected.push(format!("{name}-{n}"));
                }
            }
            let mut actual = Vec::new();
            while let Some(job) = worker.reserve(false, Duration::ZERO).await.unwrap() {
                actual.push(job.log_id().to_string());
            }
            prop_assert_eq!(actual, expected);
            Ok(())
        })?;
    }
}
