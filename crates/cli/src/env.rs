// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

/// Store URL used when `RESQ_REDIS_URL` is unset.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

pub fn redis_url() -> String {
    std::env::var("RESQ_REDIS_URL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string())
}

/// Handler file for `resq work` when `--handlers` is not given.
pub fn handlers_path() -> Option<PathBuf> {
    std::env::var("RESQ_HANDLERS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Log to this file instead of stderr.
pub fn log_file() -> Option<PathBuf> {
    std::env::var("RESQ_LOG_FILE")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
