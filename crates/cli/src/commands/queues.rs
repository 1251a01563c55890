// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `resq queues`

use anyhow::Result;
use serde::Serialize;

use crate::client::Client;
use crate::output::{print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Debug, Serialize, PartialEq)]
pub struct QueueRow {
    pub name: String,
    pub pending: u64,
}

pub async fn handle(client: &Client, format: OutputFormat) -> Result<()> {
    let registry = client.queues();
    let mut rows = Vec::new();
    for name in registry.queues().await? {
        let pending = registry.length(&name).await?;
        rows.push(QueueRow { name, pending });
    }
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            let table = table(&rows);
            if table.is_empty() {
                println!("No queues found");
            } else {
                table.print();
            }
        }
    }
    Ok(())
}

fn table(rows: &[QueueRow]) -> Table {
    let mut table = Table::new(vec![Column::left("QUEUE"), Column::right("PENDING")]);
    for row in rows {
        table.row(vec![row.name.clone(), row.pending.to_string()]);
    }
    table
}
