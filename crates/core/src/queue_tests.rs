// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    single      = { "jobs",            QueueList::Named(vec!["jobs".into()]) },
    ordered     = { "high,medium,low", QueueList::Named(vec!["high".into(), "medium".into(), "low".into()]) },
    wildcard    = { "*",               QueueList::All },
    mixed_star  = { "high,*",          QueueList::All },
    blanks      = { " a , ,b ",        QueueList::Named(vec!["a".into(), "b".into()]) },
    empty       = { "",                QueueList::Named(vec![]) },
)]
fn parse(input: &str, expected: QueueList) {
    assert_eq!(QueueList::parse(input), expected);
}

#[test]
fn display_joins_names_in_order() {
    let list = QueueList::named(["high", "low"]);
    assert_eq!(list.to_string(), "high,low");
    assert_eq!(QueueList::All.to_string(), "*");
}

#[test]
fn names_is_none_for_wildcard() {
    assert!(QueueList::All.names().is_none());
    assert!(QueueList::All.is_wildcard());
    assert_eq!(
        QueueList::named(["a"]).names(),
        Some(&["a".to_string()][..])
    );
}
