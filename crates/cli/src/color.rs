// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ANSI styling for list output.

use std::io::IsTerminal;

/// Header text: steel blue.
const HEADER: u8 = 74;
/// Secondary text: dark grey.
const MUTED: u8 = 240;

const RESET: &str = "\x1b[0m";

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

pub fn apply_header(text: &str) -> String {
    format!("{}{}{}", fg256(HEADER), text, RESET)
}

pub fn apply_muted(text: &str) -> String {
    format!("{}{}{}", fg256(MUTED), text, RESET)
}

/// Color a worker or job state by its first word.
///
/// Green for active work, yellow for waiting states, red for failures.
/// Unknown words are left alone.
pub fn apply_status(text: &str) -> String {
    let lower = text.trim_start().to_lowercase();
    let first_word = lower
        .split(|c: char| !c.is_alphabetic())
        .next()
        .unwrap_or("");
    let code = match first_word {
        "working" | "ok" => "\x1b[32m",
        "idle" | "waiting" | "paused" => "\x1b[33m",
        "failed" | "dead" => "\x1b[31m",
        _ => return text.to_string(),
    };
    format!("{code}{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
