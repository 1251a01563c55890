// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[yare::parameterized(
    one = { "1", Some(true) },
    yes = { "YES", Some(true) },
    on = { " on ", Some(true) },
    zero = { "0", Some(false) },
    false_ = { "false", Some(false) },
    garbage = { "maybe", None },
    empty = { "", None },
)]
fn flags(input: &str, expected: Option<bool>) {
    assert_eq!(parse_flag(input), expected);
}

#[test]
#[serial]
fn interval_reads_milliseconds() {
    std::env::set_var("RESQ_INTERVAL_MS", "250");
    assert_eq!(interval(), Some(Duration::from_millis(250)));
    std::env::set_var("RESQ_INTERVAL_MS", "soon");
    assert_eq!(interval(), None);
    std::env::remove_var("RESQ_INTERVAL_MS");
    assert_eq!(interval(), None);
}

#[test]
#[serial]
fn blocking_reads_flag() {
    std::env::set_var("RESQ_BLOCKING", "true");
    assert_eq!(blocking(), Some(true));
    std::env::remove_var("RESQ_BLOCKING");
    assert_eq!(blocking(), None);
}

#[test]
#[serial]
fn empty_prefix_is_ignored() {
    std::env::set_var("RESQ_PREFIX", "");
    assert_eq!(prefix(), None);
    std::env::set_var("RESQ_PREFIX", "app:");
    assert_eq!(prefix().as_deref(), Some("app:"));
    std::env::remove_var("RESQ_PREFIX");
}
