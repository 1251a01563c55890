// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_core::utc_from_epoch_ms;

fn record(payload: serde_json::Value) -> FailureRecord {
    FailureRecord {
        failed_at: utc_from_epoch_ms(1_767_225_600_000),
        payload,
        exception: "JobFailed".to_string(),
        error: "boom".to_string(),
        worker: "h:1:mail".to_string(),
        queue: "mail".to_string(),
    }
}

#[test]
fn class_from_payload() {
    assert_eq!(class_of(&record(serde_json::json!({"class": "Mailer"}))), "Mailer");
    assert_eq!(class_of(&record(serde_json::json!("{broken"))), "?");
}

#[test]
fn table_row_per_record() {
    let records = vec![
        record(serde_json::json!({"class": "Mailer"})),
        record(serde_json::json!("{broken")),
    ];
    let mut buf = Vec::new();
    table(&records).render(&mut buf);
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out.lines().count(), 3);
    assert!(out.contains("2026-01-01T00:00:00Z"));
}
