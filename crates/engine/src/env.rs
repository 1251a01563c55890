// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::time::Duration;

/// Poll interval override (milliseconds). `0` selects drain mode.
pub fn interval() -> Option<Duration> {
    std::env::var("RESQ_INTERVAL_MS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Blocking reservation override. Accepts `1/0`, `true/false`, `yes/no`.
pub fn blocking() -> Option<bool> {
    std::env::var("RESQ_BLOCKING")
        .ok()
        .and_then(|s| parse_flag(&s))
}

/// Key prefix override.
pub fn prefix() -> Option<String> {
    std::env::var("RESQ_PREFIX")
        .ok()
        .filter(|s| !s.is_empty())
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
