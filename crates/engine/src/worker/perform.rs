// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The work loop and per-job processing.

use super::{WorkOptions, WorkSummary, Worker, WorkerState};
use crate::error::EngineError;
use crate::performer::JobPerformer;
use resq_adapters::{ProcessAdapter, StoreAdapter};
use resq_core::{Clock, Job};

impl<S, P, J, C> Worker<S, P, J, C>
where
    S: StoreAdapter,
    P: ProcessAdapter,
    J: JobPerformer,
    C: Clock,
{
    /// Run the reserve/perform loop.
    ///
    /// The first call prunes dead workers and registers. The loop ends when
    /// shutdown was requested (the worker unregisters and its statistics are
    /// erased), when draining finds nothing to do, or after
    /// `max_iterations`. Job failures never end the loop; store errors do.
    pub async fn work(&mut self, options: &WorkOptions) -> Result<WorkSummary, EngineError> {
        let mut summary = WorkSummary::default();
        if self.state == WorkerState::Unregistered {
            return Ok(summary);
        }
        if !self.started {
            self.startup().await?;
        }

        loop {
            if self.shutdown.is_requested() {
                self.finish_shutdown().await?;
                break;
            }
            if options
                .max_iterations
                .is_some_and(|max| summary.iterations >= max)
            {
                break;
            }
            summary.iterations += 1;

            if self.registry.is_paused(&self.identity).await? {
                if self.state != WorkerState::Paused {
                    tracing::info!(worker = %self.identity, "processing paused");
                    self.state = WorkerState::Paused;
                }
                if options.is_drain() {
                    break;
                }
                tokio::time::sleep(options.interval).await;
                continue;
            }
            if self.state == WorkerState::Paused {
                tracing::info!(worker = %self.identity, "processing resumed");
            }

            self.state = WorkerState::WaitingOnQueues;
            let job = match self.reserve(options.blocking, options.timeout).await {
                Ok(job) => job,
                Err(EngineError::MalformedPayload { queue, raw, source }) => {
                    tracing::warn!(queue = queue.as_str(), error = %source, "malformed payload");
                    self.report(
                        &queue,
                        serde_json::Value::String(raw),
                        "MalformedPayload",
                        &source.to_string(),
                    )
                    .await?;
                    summary.failed += 1;
                    self.state = WorkerState::Idle;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(job) = job else {
                self.state = WorkerState::Idle;
                if options.is_drain() {
                    break;
                }
                if !options.blocking {
                    tokio::time::sleep(options.interval).await;
                }
                continue;
            };

            if self.perform(&job).await? {
                summary.processed += 1;
            } else {
                summary.failed += 1;
            }
        }
        Ok(summary)
    }

    /// Perform one job with full bookkeeping. Returns whether it succeeded.
    ///
    /// Every job ends with the working-on record cleared and `processed`
    /// incremented; a failed one additionally gets a failure report and a
    /// `failed` increment.
    pub async fn perform(&mut self, job: &Job) -> Result<bool, EngineError> {
        self.working_on(job).await?;
        tracing::info!(
            worker = %self.identity,
            queue = job.queue.as_str(),
            class = job.class(),
            job_id = job.log_id(),
            "processing job"
        );

        let start = self.clock.now();
        let result = self.performer.perform(job).await;
        let elapsed_ms = self.clock.now().saturating_duration_since(start).as_millis() as u64;

        let ok = match result {
            Ok(()) => {
                tracing::info!(class = job.class(), job_id = job.log_id(), elapsed_ms, "job done");
                true
            }
            Err(e) => {
                tracing::warn!(
                    class = job.class(),
                    job_id = job.log_id(),
                    elapsed_ms,
                    error = %e,
                    "job failed"
                );
                self.fail_job(job, e.kind(), &e.to_string()).await?;
                false
            }
        };
        self.done_working().await?;
        Ok(ok)
    }
}
