// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn no_color_wins_over_force() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");
    assert!(!should_colorize());
    std::env::remove_var("NO_COLOR");
    assert!(should_colorize());
    std::env::remove_var("COLOR");
}

#[yare::parameterized(
    working = { "working (mail)", "\x1b[32mworking (mail)\x1b[0m" },
    idle = { "idle", "\x1b[33midle\x1b[0m" },
    paused = { "paused", "\x1b[33mpaused\x1b[0m" },
    failed = { "failed: boom", "\x1b[31mfailed: boom\x1b[0m" },
    unknown = { "something", "something" },
)]
fn status_colors(input: &str, expected: &str) {
    assert_eq!(apply_status(input), expected);
}

#[test]
fn header_and_muted_wrap_text() {
    assert_eq!(apply_header("NAME"), "\x1b[38;5;74mNAME\x1b[0m");
    assert_eq!(apply_muted("-"), "\x1b[38;5;240m-\x1b[0m");
}
