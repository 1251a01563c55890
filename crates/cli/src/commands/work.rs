// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `resq work`: run a worker in the foreground.
//!
//! SIGINT/SIGTERM request a cooperative shutdown (a second one exits
//! immediately), SIGUSR2 pauses processing and SIGCONT resumes it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use resq_adapters::SystemProcessAdapter;
use resq_core::{QueueList, SystemClock};
use resq_engine::{CommandPerformer, WorkOptions, WorkSummary, Worker, WorkerDeps};
use serde::Serialize;

use crate::client::Client;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct WorkArgs {
    /// Queues to poll, highest priority first; `*` polls every known queue
    #[arg(short, long = "queue", value_delimiter = ',', default_value = "*")]
    pub queues: Vec<String>,
    /// Milliseconds between polls; 0 drains the queues and exits
    #[arg(long)]
    pub interval: Option<u64>,
    /// Wait on all queues at once instead of sleeping between polls
    #[arg(long)]
    pub blocking: bool,
    /// Seconds to wait in one blocking pop (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
    /// TOML file mapping job classes to shell commands
    #[arg(long)]
    pub handlers: Option<PathBuf>,
}

/// Resolved worker settings, checked before connecting.
pub struct Prepared {
    pub queues: QueueList,
    pub options: WorkOptions,
    pub performer: CommandPerformer,
}

impl WorkArgs {
    pub fn prepare(self) -> Result<Prepared> {
        let path = self
            .handlers
            .clone()
            .or_else(crate::env::handlers_path)
            .context("no handler file: pass --handlers or set RESQ_HANDLERS")?;
        let performer = CommandPerformer::load(&path)?;
        if performer.is_empty() {
            tracing::warn!(path = %path.display(), "handler file defines no handlers");
        }
        Ok(Prepared {
            queues: QueueList::named(self.queues.iter().map(String::as_str)),
            options: self.options(WorkOptions::from_env()),
            performer,
        })
    }

    /// Flags override the environment-derived defaults.
    fn options(&self, mut options: WorkOptions) -> WorkOptions {
        if let Some(ms) = self.interval {
            options.interval = Duration::from_millis(ms);
            if ms > 0 {
                options.timeout = options.interval;
            }
        }
        if self.blocking {
            options.blocking = true;
        }
        if let Some(secs) = self.timeout {
            options.timeout = Duration::from_secs(secs);
        }
        options
    }
}

#[derive(Serialize)]
struct Finished<'a> {
    worker: &'a str,
    iterations: u64,
    processed: u64,
    failed: u64,
}

pub async fn handle(prepared: Prepared, client: Client, format: OutputFormat) -> Result<()> {
    let deps = WorkerDeps {
        store: client.store.clone(),
        process: SystemProcessAdapter::new(),
        performer: prepared.performer,
    };
    let mut worker = Worker::new(deps, prepared.queues, client.keys.clone(), SystemClock);
    tracing::info!(worker = %worker, "starting worker");

    #[cfg(unix)]
    signals::watch(&worker)?;

    let summary: WorkSummary = worker.work(&prepared.options).await?;
    let identity = worker.identity().to_string();
    match format {
        OutputFormat::Json => print_json(&Finished {
            worker: &identity,
            iterations: summary.iterations,
            processed: summary.processed,
            failed: summary.failed,
        })?,
        OutputFormat::Text => println!(
            "{identity}: {} processed, {} failed",
            summary.processed, summary.failed
        ),
    }
    Ok(())
}

#[cfg(unix)]
mod signals {
    use anyhow::Result;
    use resq_adapters::{ProcessAdapter, StoreAdapter};
    use resq_core::Clock;
    use resq_engine::{JobPerformer, Worker};
    use tokio::signal::unix::{signal, SignalKind};

    enum Received {
        Stop,
        Pause,
        Resume,
    }

    /// Spawn a task translating process signals into worker requests.
    pub fn watch<S, P, J, C>(worker: &Worker<S, P, J, C>) -> Result<()>
    where
        S: StoreAdapter,
        P: ProcessAdapter,
        J: JobPerformer,
        C: Clock,
    {
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigusr2 = signal(SignalKind::user_defined2())?;
        let mut sigcont = signal(SignalKind::from_raw(nix::sys::signal::Signal::SIGCONT as i32))?;

        let shutdown = worker.shutdown_handle();
        let registry = worker.registry().clone();
        let identity = worker.identity().clone();

        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    _ = sigint.recv() => Received::Stop,
                    _ = sigterm.recv() => Received::Stop,
                    _ = sigusr2.recv() => Received::Pause,
                    _ = sigcont.recv() => Received::Resume,
                };
                match received {
                    Received::Stop if shutdown.is_requested() => {
                        tracing::warn!("second stop signal, exiting without cleanup");
                        std::process::exit(1);
                    }
                    Received::Stop => {
                        tracing::info!("stop signal received, finishing current job");
                        shutdown.request();
                    }
                    Received::Pause | Received::Resume => {
                        let paused = matches!(received, Received::Pause);
                        if let Err(e) = registry.set_paused(&identity, paused).await {
                            tracing::error!(error = %e, paused, "failed to update pause flag");
                        } else if paused {
                            tracing::info!("pause signal received");
                        } else {
                            tracing::info!("resume signal received");
                        }
                    }
                }
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "work_tests.rs"]
mod tests;
