// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_core::utc_from_epoch_ms;

#[yare::parameterized(
    seconds = { 45_000, "45s" },
    minutes = { 150_000, "2m" },
    hours = { 3_600_000 * 3, "3h" },
)]
fn age_of_timestamp(elapsed_ms: u64, expected: &str) {
    let now = utc_from_epoch_ms(1_767_225_600_000 + elapsed_ms);
    let at = utc_from_epoch_ms(1_767_225_600_000);
    assert_eq!(format_age(Some(at), now), expected);
}

#[test]
fn missing_timestamp_is_dash() {
    assert_eq!(format_age(None, utc_from_epoch_ms(0)), "-");
}

#[test]
fn future_timestamp_clamps_to_zero() {
    let now = utc_from_epoch_ms(1_000);
    assert_eq!(format_age(Some(utc_from_epoch_ms(60_000)), now), "0s");
}

#[test]
fn output_format_defaults_to_text() {
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
}
