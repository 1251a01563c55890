// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! resq - background job worker and queue inspector

mod client;
mod color;
mod commands;
mod env;
mod logging;
mod output;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{enqueue, failed, queues, stats, work, workers};
use output::OutputFormat;

use crate::client::Client;

#[derive(Parser)]
#[command(name = "resq", version, about = "resq - Redis-backed job queue worker")]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a worker until interrupted
    Work(work::WorkArgs),
    /// Push a job onto a queue
    Enqueue(enqueue::EnqueueArgs),
    /// List known queues and their backlog
    Queues,
    /// List registered workers
    Workers,
    /// Remove registrations left by dead workers on this host
    Prune,
    /// Stop a worker from taking new jobs
    Pause {
        /// Worker identity (host:pid:queues)
        worker: String,
    },
    /// Let a paused worker take jobs again
    Resume {
        /// Worker identity (host:pid:queues)
        worker: String,
    },
    /// Show processed and failed counters
    Stats(stats::StatsArgs),
    /// List failure reports
    Failed(failed::FailedArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped; otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let _guard = logging::init()?;

    match command {
        Commands::Work(args) => {
            let prepared = args.prepare()?;
            let client = Client::connect().await?;
            work::handle(prepared, client, format).await?
        }
        Commands::Enqueue(args) => {
            let prepared = args.prepare()?;
            let client = Client::connect().await?;
            enqueue::handle(prepared, &client, format).await?
        }
        Commands::Queues => queues::handle(&Client::connect().await?, format).await?,
        Commands::Workers => workers::list(&Client::connect().await?, format).await?,
        Commands::Prune => workers::prune(&Client::connect().await?, format).await?,
        Commands::Pause { worker } => {
            let identity = workers::parse_identity(&worker)?;
            workers::set_paused(&Client::connect().await?, &identity, true, format).await?
        }
        Commands::Resume { worker } => {
            let identity = workers::parse_identity(&worker)?;
            workers::set_paused(&Client::connect().await?, &identity, false, format).await?
        }
        Commands::Stats(args) => {
            let worker = args.worker.as_deref().map(workers::parse_identity).transpose()?;
            stats::handle(&Client::connect().await?, worker.as_ref(), format).await?
        }
        Commands::Failed(args) => failed::handle(args, &Client::connect().await?, format).await?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
