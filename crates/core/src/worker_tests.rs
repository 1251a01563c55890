// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn display_is_host_pid_queues() {
    let id = WorkerIdentity::new("web1", 4242, QueueList::named(["high", "low"]));
    assert_eq!(id.to_string(), "web1:4242:high,low");

    let wildcard = WorkerIdentity::new("web1", 7, QueueList::All);
    assert_eq!(wildcard.to_string(), "web1:7:*");
}

#[test]
fn parse_recovers_components() {
    let id: WorkerIdentity = "my.other.host:1:jobs".parse().unwrap();
    assert_eq!(id.host(), "my.other.host");
    assert_eq!(id.pid(), 1);
    assert_eq!(id.queues(), &QueueList::named(["jobs"]));
    assert!(id.is_on_host("my.other.host"));
    assert!(!id.is_on_host("localhost"));
}

#[test]
fn parse_keeps_colons_in_queue_segment() {
    let id: WorkerIdentity = "h:2:a:b".parse().unwrap();
    assert_eq!(id.queues(), &QueueList::named(["a:b"]));
}

#[yare::parameterized(
    trailing_comma = { "host:1:jobs," },
    padded_pid     = { "host:0002:jobs" },
    spaced_queues  = { "host:3:jobs, low" },
)]
fn parse_keeps_source_string(input: &str) {
    let id: WorkerIdentity = input.parse().unwrap();
    assert_eq!(id.to_string(), input);
}

#[test]
fn parsed_non_canonical_string_differs_from_constructed() {
    let parsed: WorkerIdentity = "host:0002:jobs".parse().unwrap();
    let built = WorkerIdentity::new("host", 2, QueueList::named(["jobs"]));
    assert_eq!(parsed.pid(), built.pid());
    assert_ne!(parsed, built);
}

#[yare::parameterized(
    missing_queues = { "host:12" },
    only_host      = { "host" },
    empty_host     = { ":12:jobs" },
)]
fn parse_rejects_malformed(input: &str) {
    assert!(matches!(
        input.parse::<WorkerIdentity>(),
        Err(IdentityError::Malformed(_))
    ));
}

#[test]
fn parse_rejects_non_numeric_pid() {
    let err = "host:abc:jobs".parse::<WorkerIdentity>().unwrap_err();
    assert_eq!(
        err,
        IdentityError::InvalidPid {
            identity: "host:abc:jobs".to_string(),
            pid: "abc".to_string(),
        }
    );
}

#[test]
fn serializes_as_string() {
    let id = WorkerIdentity::new("h", 3, QueueList::All);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"h:3:*\"");
    let back: WorkerIdentity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

proptest::proptest! {
    #[test]
    fn parsed_display_matches_source(
        host in "[a-z][a-z0-9.-]{0,20}",
        pid in proptest::prelude::any::<u32>(),
        queues in proptest::collection::vec("[a-z_][a-z0-9_]{0,10}", 1..5),
    ) {
        let id = WorkerIdentity::new(host, pid, QueueList::named(queues));
        let parsed: WorkerIdentity = id.to_string().parse().unwrap();
        proptest::prop_assert_eq!(parsed, id);
    }
}
