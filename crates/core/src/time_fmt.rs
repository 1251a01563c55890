// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp and duration formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Convert epoch milliseconds to a UTC timestamp (the epoch itself if out of range).
pub fn utc_from_epoch_ms(epoch_ms: u64) -> DateTime<Utc> {
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
}

/// Format epoch milliseconds as `2026-01-30T08:14:09Z`.
pub fn format_utc(epoch_ms: u64) -> String {
    utc_from_epoch_ms(epoch_ms).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format seconds as a short duration: `"5s"`, `"2m"`, `"1h30m"`, `"3d"`.
pub fn format_elapsed(secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match secs {
        s if s < MINUTE => format!("{s}s"),
        s if s < HOUR => format!("{}m", s / MINUTE),
        s if s < DAY => match (s % HOUR) / MINUTE {
            0 => format!("{}h", s / HOUR),
            m => format!("{}h{m}m", s / HOUR),
        },
        s => format!("{}d", s / DAY),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
