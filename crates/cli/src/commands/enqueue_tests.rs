// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn args(queue: &str, class: &str, json: Option<&str>) -> EnqueueArgs {
    EnqueueArgs {
        queue: queue.to_string(),
        class: class.to_string(),
        args: json.map(str::to_string),
    }
}

#[test]
fn prepare_without_args() {
    let prepared = args("mail", "Mailer", None).prepare().unwrap();
    assert_eq!(prepared.queue, "mail");
    assert_eq!(prepared.payload, Payload::new("Mailer"));
}

#[test]
fn prepare_wraps_args_in_array() {
    let prepared = args("mail", "Mailer", Some(r#"{"to":"a@b"}"#))
        .prepare()
        .unwrap();
    assert_eq!(prepared.payload.args, vec![serde_json::json!({"to": "a@b"})]);
}

#[test]
fn prepare_rejects_bad_json() {
    let err = args("mail", "Mailer", Some("{oops")).prepare().unwrap_err();
    assert!(err.to_string().contains("ARGS_JSON"), "{err}");
}

#[yare::parameterized(
    wildcard = { "*" },
    comma = { "a,b" },
    blank = { " " },
)]
fn prepare_rejects_bad_queue(queue: &str) {
    assert!(args(queue, "Mailer", None).prepare().is_err());
}

#[test]
fn prepare_rejects_empty_class() {
    assert!(args("mail", "  ", None).prepare().is_err());
}
