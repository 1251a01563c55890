// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_adapters::FakeStore;
use resq_core::utc_from_epoch_ms;

fn record(error: &str) -> FailureRecord {
    FailureRecord {
        failed_at: utc_from_epoch_ms(1_767_225_600_000),
        payload: serde_json::json!({"class": "Mail", "args": []}),
        exception: "JobFailed".to_string(),
        error: error.to_string(),
        worker: "h:1:mail".to_string(),
        queue: "mail".to_string(),
    }
}

#[tokio::test]
async fn report_appends_in_order() {
    let log = FailureLog::new(FakeStore::new(), Keys::default());
    log.report(&record("first")).await.unwrap();
    log.report(&record("second")).await.unwrap();
    log.report(&record("third")).await.unwrap();

    assert_eq!(log.count().await.unwrap(), 3);
    let errors: Vec<String> = log
        .list(1, 5)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.error)
        .collect();
    assert_eq!(errors, vec!["second", "third"]);
}

#[tokio::test]
async fn list_with_zero_count_is_empty() {
    let log = FailureLog::new(FakeStore::new(), Keys::default());
    log.report(&record("only")).await.unwrap();
    assert!(log.list(0, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_skips_garbage() {
    let store = FakeStore::new();
    store.rpush("resque:failed", "garbage").await.unwrap();
    let log = FailureLog::new(store, Keys::default());
    log.report(&record("real")).await.unwrap();

    let records = log.list(0, 10).await.unwrap();
    assert_eq!(records, vec![record("real")]);
}
