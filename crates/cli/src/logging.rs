// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. Logs go to `RESQ_LOG_FILE` when set,
/// stderr otherwise. The returned guard flushes the writer on drop.
pub fn init() -> Result<WorkerGuard> {
    let (writer, guard) = match crate::env::log_file() {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            let name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_target(false))
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}
