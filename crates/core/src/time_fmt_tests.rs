// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{format_elapsed, format_utc, utc_from_epoch_ms};

#[yare::parameterized(
    zero_seconds     = { 0,      "0s" },
    max_seconds      = { 59,     "59s" },
    one_minute       = { 60,     "1m" },
    hour_and_minutes = { 3660,   "1h1m" },
    hours_no_minutes = { 7200,   "2h" },
    almost_a_day     = { 86399,  "23h59m" },
    two_days         = { 172800, "2d" },
)]
fn elapsed(secs: u64, expected: &str) {
    assert_eq!(format_elapsed(secs), expected);
}

#[test]
fn format_utc_uses_second_precision_and_z_suffix() {
    assert_eq!(format_utc(1_767_225_600_000), "2026-01-01T00:00:00Z");
    assert_eq!(format_utc(1_767_225_601_999), "2026-01-01T00:00:01Z");
}

#[test]
fn out_of_range_epoch_falls_back_to_unix_epoch() {
    assert_eq!(utc_from_epoch_ms(u64::MAX).timestamp(), 0);
}
