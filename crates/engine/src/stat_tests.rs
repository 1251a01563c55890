// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_adapters::FakeStore;
use resq_core::test_support::identity;

#[tokio::test]
async fn missing_counter_reads_zero() {
    let stat = Statistic::new(FakeStore::new(), &Keys::default(), PROCESSED);
    assert_eq!(stat.get().await.unwrap(), 0);
}

#[tokio::test]
async fn incr_decr_and_clear() {
    let store = FakeStore::new();
    let stat = Statistic::new(store.clone(), &Keys::default(), FAILED);

    stat.incr().await.unwrap();
    stat.incr_by(4).await.unwrap();
    assert_eq!(stat.decr().await.unwrap(), 4);
    assert_eq!(stat.get().await.unwrap(), 4);
    assert_eq!(
        store.get("resque:stat:failed").await.unwrap().as_deref(),
        Some("4")
    );

    assert!(stat.clear().await.unwrap());
    assert_eq!(stat.get().await.unwrap(), 0);
    assert!(!stat.clear().await.unwrap());
}

#[tokio::test]
async fn garbage_value_reads_zero() {
    let store = FakeStore::new();
    store.set("resque:stat:processed", "lots").await.unwrap();
    let stat = Statistic::new(store, &Keys::default(), PROCESSED);
    assert_eq!(stat.get().await.unwrap(), 0);
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    let store = FakeStore::new();
    let mut tasks = Vec::new();
    for _ in 0..16 {
        let stat = Statistic::new(store.clone(), &Keys::default(), PROCESSED);
        tasks.push(tokio::spawn(async move {
            for _ in 0..10 {
                stat.incr().await.unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    let stat = Statistic::new(store, &Keys::default(), PROCESSED);
    assert_eq!(stat.get().await.unwrap(), 160);
}

#[test]
fn worker_stat_appends_identity() {
    let id = identity("web1", 12, "high,low");
    assert_eq!(worker_stat(PROCESSED, &id), "processed:web1:12:high,low");
}
