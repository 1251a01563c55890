// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process adapter backed by the operating system.

use super::ProcessAdapter;

/// Uses the system hostname and signal-0 probing for liveness.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProcessAdapter;

impl SystemProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessAdapter for SystemProcessAdapter {
    fn hostname(&self) -> String {
        hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string())
    }

    fn pid(&self) -> u32 {
        std::process::id()
    }

    #[cfg(unix)]
    fn is_alive(&self, pid: u32) -> bool {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        // pid 0 and negative values address process groups, not a process
        let Ok(raw) = i32::try_from(pid) else {
            return false;
        };
        if raw <= 0 {
            return false;
        }
        match kill(Pid::from_raw(raw), None) {
            Ok(()) => true,
            // Exists but owned by another user
            Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    fn is_alive(&self, _pid: u32) -> bool {
        // No portable probe: report alive so nothing is pruned
        true
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
