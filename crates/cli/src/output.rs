// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Relative age of a timestamp (e.g. "5s", "2m", "1h"), or "-" when absent.
pub fn format_age(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match at {
        Some(at) => {
            let secs = now.signed_duration_since(at).num_seconds().max(0) as u64;
            resq_core::format_elapsed(secs)
        }
        None => "-".to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
