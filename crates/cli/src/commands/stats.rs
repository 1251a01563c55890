// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `resq stats`

use anyhow::Result;
use clap::Args;
use resq_core::WorkerIdentity;
use resq_engine::stat;
use serde::Serialize;

use crate::client::Client;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct StatsArgs {
    /// Show one worker's counters instead of the global ones
    #[arg(long)]
    pub worker: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Stats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<String>,
    pub processed: i64,
    pub failed: i64,
}

impl Stats {
    fn render(&self) -> String {
        let scope = self.worker.as_deref().unwrap_or("all workers");
        format!(
            "{scope}\n  processed  {}\n  failed     {}",
            self.processed, self.failed
        )
    }
}

pub async fn handle(
    client: &Client,
    worker: Option<&WorkerIdentity>,
    format: OutputFormat,
) -> Result<()> {
    let name = |base: &str| match worker {
        Some(w) => stat::worker_stat(base, w),
        None => base.to_string(),
    };
    let stats = Stats {
        worker: worker.map(ToString::to_string),
        processed: client.statistic(&name(stat::PROCESSED)).get().await?,
        failed: client.statistic(&name(stat::FAILED)).get().await?,
    };
    match format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Text => println!("{}", stats.render()),
    }
    Ok(())
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
