// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_core::test_support::job;
use resq_core::utc_from_epoch_ms;

fn row(working_on: Option<WorkingOn>, paused: bool) -> WorkerRow {
    let identity = parse_identity("web1:12:mail,reports").unwrap();
    WorkerRow {
        host: identity.host().to_string(),
        pid: identity.pid(),
        queues: identity.queues().to_string(),
        started: Some(utc_from_epoch_ms(1_767_225_600_000)),
        paused,
        working_on,
        identity,
    }
}

#[test]
fn parse_identity_accepts_canonical_form() {
    let identity = parse_identity("web1:12:mail,reports").unwrap();
    assert_eq!(identity.host(), "web1");
    assert_eq!(identity.pid(), 12);
}

#[yare::parameterized(
    no_pid = { "web1" },
    bad_pid = { "web1:abc:mail" },
)]
fn parse_identity_rejects_garbage(raw: &str) {
    let err = parse_identity(raw).unwrap_err();
    assert!(err.to_string().contains("host:pid:queues"), "{err}");
}

#[test]
fn state_label() {
    let record = WorkingOn::new(&job("mail", "Mailer", "1"), utc_from_epoch_ms(0));
    assert_eq!(row(Some(record), false).state(), "working (Mailer)");
    assert_eq!(row(None, true).state(), "paused");
    assert_eq!(row(None, false).state(), "idle");
}

#[test]
fn json_row_uses_identity_string() {
    let value = serde_json::to_value(row(None, false)).unwrap();
    assert_eq!(value["identity"], "web1:12:mail,reports");
    assert_eq!(value["queues"], "mail,reports");
    assert_eq!(value["started"], "2026-01-01T00:00:00Z");
    assert!(value["working_on"].is_null());
}

#[test]
fn table_has_one_line_per_worker() {
    let rows = vec![row(None, false), row(None, true)];
    let mut buf = Vec::new();
    table(&rows, utc_from_epoch_ms(1_767_225_660_000)).render(&mut buf);
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out.lines().count(), 3);
    assert!(out.contains("1m"), "{out}");
}
