// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `resq failed`

use anyhow::Result;
use clap::Args;
use resq_core::{format_utc, FailureRecord};

use crate::client::Client;
use crate::output::{print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct FailedArgs {
    /// Skip this many of the oldest reports
    #[arg(long, default_value_t = 0)]
    pub start: u64,
    /// Show at most this many reports
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: u64,
}

pub async fn handle(args: FailedArgs, client: &Client, format: OutputFormat) -> Result<()> {
    let log = client.failures();
    let total = log.count().await?;
    let records = log.list(args.start, args.limit).await?;

    match format {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No failed jobs");
            } else {
                table(&records).print();
                if total > records.len() as u64 {
                    println!("\n{} of {} failed job(s) shown", records.len(), total);
                }
            }
        }
    }
    Ok(())
}

/// Class name from a stored payload, or `?` for raw/garbled payloads.
fn class_of(record: &FailureRecord) -> &str {
    record
        .payload
        .get("class")
        .and_then(|c| c.as_str())
        .unwrap_or("?")
}

fn table(records: &[FailureRecord]) -> Table {
    let mut table = Table::new(vec![
        Column::muted("FAILED AT"),
        Column::left("QUEUE"),
        Column::left("CLASS"),
        Column::status("EXCEPTION"),
        Column::left("ERROR").with_max(80),
    ]);
    for record in records {
        table.row(vec![
            format_utc(record.failed_at.timestamp_millis().max(0) as u64),
            record.queue.clone(),
            class_of(record).to_string(),
            record.exception.clone(),
            record.error.clone(),
        ]);
    }
    table
}

#[cfg(test)]
#[path = "failed_tests.rs"]
mod tests;
