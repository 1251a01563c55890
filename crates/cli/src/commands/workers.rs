// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `resq workers`, `resq prune`, `resq pause` and `resq resume`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use resq_adapters::SystemProcessAdapter;
use resq_core::{format_utc, WorkerIdentity, WorkingOn};
use serde::Serialize;

use crate::client::Client;
use crate::output::{format_age, print_json, OutputFormat};
use crate::table::{Column, Table};

pub fn parse_identity(raw: &str) -> Result<WorkerIdentity> {
    raw.parse::<WorkerIdentity>()
        .with_context(|| format!("'{raw}' is not a worker identity (expected host:pid:queues)"))
}

#[derive(Debug, Serialize)]
pub struct WorkerRow {
    pub identity: WorkerIdentity,
    pub host: String,
    pub pid: u32,
    pub queues: String,
    pub started: Option<DateTime<Utc>>,
    pub paused: bool,
    pub working_on: Option<WorkingOn>,
}

impl WorkerRow {
    /// Short state label for the table.
    fn state(&self) -> String {
        match (&self.working_on, self.paused) {
            (Some(record), _) => format!("working ({})", record.payload.class),
            (None, true) => "paused".to_string(),
            (None, false) => "idle".to_string(),
        }
    }
}

pub async fn list(client: &Client, format: OutputFormat) -> Result<()> {
    let registry = client.registry();
    let mut rows = Vec::new();
    for identity in registry.all().await? {
        let working_on = match registry.working_on(&identity).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(worker = %identity, error = %e, "unreadable working-on record");
                None
            }
        };
        rows.push(WorkerRow {
            host: identity.host().to_string(),
            pid: identity.pid(),
            queues: identity.queues().to_string(),
            started: registry.started(&identity).await?,
            paused: registry.is_paused(&identity).await?,
            working_on,
            identity,
        });
    }
    rows.sort_by(|a, b| (&a.host, a.pid).cmp(&(&b.host, b.pid)));

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            let table = table(&rows, Utc::now());
            if table.is_empty() {
                println!("No workers registered");
            } else {
                table.print();
            }
        }
    }
    Ok(())
}

fn table(rows: &[WorkerRow], now: DateTime<Utc>) -> Table {
    let mut table = Table::new(vec![
        Column::left("WORKER").with_max(48),
        Column::right("UP"),
        Column::muted("STARTED"),
        Column::status("STATE"),
    ]);
    for row in rows {
        table.row(vec![
            row.identity.to_string(),
            format_age(row.started, now),
            row.started
                .map(|t| format_utc(t.timestamp_millis().max(0) as u64))
                .unwrap_or_else(|| "-".to_string()),
            row.state(),
        ]);
    }
    table
}

pub async fn prune(client: &Client, format: OutputFormat) -> Result<()> {
    let pruned = client
        .registry()
        .prune_dead(&SystemProcessAdapter::new(), None)
        .await?;
    match format {
        OutputFormat::Json => print_json(&pruned)?,
        OutputFormat::Text => {
            for identity in &pruned {
                println!("Pruned {identity}");
            }
            println!("{} dead worker(s) pruned", pruned.len());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PauseResult<'a> {
    worker: &'a WorkerIdentity,
    paused: bool,
}

pub async fn set_paused(
    client: &Client,
    identity: &WorkerIdentity,
    paused: bool,
    format: OutputFormat,
) -> Result<()> {
    let registry = client.registry();
    if !registry.exists(identity).await? {
        anyhow::bail!("worker {identity} is not registered");
    }
    registry.set_paused(identity, paused).await?;
    match format {
        OutputFormat::Json => print_json(&PauseResult {
            worker: identity,
            paused,
        })?,
        OutputFormat::Text => {
            let verb = if paused { "Paused" } else { "Resumed" };
            println!("{verb} {identity}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "workers_tests.rs"]
mod tests;
