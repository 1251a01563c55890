// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn global_render() {
    let stats = Stats {
        worker: None,
        processed: 12,
        failed: 3,
    };
    assert_eq!(
        stats.render(),
        "all workers\n  processed  12\n  failed     3"
    );
    assert_eq!(
        serde_json::to_value(&stats).unwrap(),
        serde_json::json!({"processed": 12, "failed": 3})
    );
}

#[test]
fn worker_render() {
    let stats = Stats {
        worker: Some("h:1:q".to_string()),
        processed: 0,
        failed: 0,
    };
    assert!(stats.render().starts_with("h:1:q\n"));
    assert_eq!(serde_json::to_value(&stats).unwrap()["worker"], "h:1:q");
}
