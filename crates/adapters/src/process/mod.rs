// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local process identity and liveness

mod system;

pub use system::SystemProcessAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProcessAdapter;

/// Adapter answering "who am I" and "is that pid still running" for the
/// local host.
///
/// Liveness can only be checked for processes on this host; callers must
/// compare hosts before asking.
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// Name of the local host, as embedded in worker identities.
    fn hostname(&self) -> String;

    /// OS process id of the current process.
    fn pid(&self) -> u32;

    /// Whether a process with `pid` currently exists on this host.
    fn is_alive(&self, pid: u32) -> bool;
}
