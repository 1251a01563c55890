// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `resq enqueue`

use anyhow::{Context, Result};
use clap::Args;
use resq_core::Payload;
use resq_engine::validate_queue_name;
use serde::Serialize;

use crate::client::Client;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct EnqueueArgs {
    /// Queue to push onto
    pub queue: String,
    /// Handler class of the job
    pub class: String,
    /// Job arguments as a JSON value
    pub args: Option<String>,
}

/// Validated enqueue request.
#[derive(Debug, PartialEq)]
pub struct Prepared {
    pub queue: String,
    pub payload: Payload,
}

impl EnqueueArgs {
    /// Check the queue name and decode the arguments before connecting.
    pub fn prepare(self) -> Result<Prepared> {
        validate_queue_name(&self.queue)?;
        if self.class.trim().is_empty() {
            anyhow::bail!("job class must not be empty");
        }
        let mut payload = Payload::new(self.class);
        if let Some(raw) = self.args {
            let args: serde_json::Value =
                serde_json::from_str(&raw).context("ARGS_JSON is not valid JSON")?;
            payload = payload.with_args(args);
        }
        Ok(Prepared {
            queue: self.queue,
            payload,
        })
    }
}

#[derive(Serialize)]
struct Enqueued<'a> {
    id: &'a str,
    queue: &'a str,
    class: &'a str,
}

pub async fn handle(prepared: Prepared, client: &Client, format: OutputFormat) -> Result<()> {
    let job = client.queues().enqueue(&prepared.queue, prepared.payload).await?;
    let id = job.id().map(|id| id.as_str()).unwrap_or("");
    match format {
        OutputFormat::Json => print_json(&Enqueued {
            id,
            queue: &job.queue,
            class: job.class(),
        })?,
        OutputFormat::Text => println!("{id}"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "enqueue_tests.rs"]
mod tests;
