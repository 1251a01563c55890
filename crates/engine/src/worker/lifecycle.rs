// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration, pausing, shutdown and dead-worker cleanup.

use super::{Worker, WorkerState};
use crate::error::EngineError;
use crate::performer::JobPerformer;
use crate::stat;
use resq_adapters::{ProcessAdapter, StoreAdapter};
use resq_core::{utc_from_epoch_ms, Clock, FailureRecord, Job, WorkerIdentity, WorkingOn};

impl<S, P, J, C> Worker<S, P, J, C>
where
    S: StoreAdapter,
    P: ProcessAdapter,
    J: JobPerformer,
    C: Clock,
{
    /// Announce this worker in the `workers` set and stamp its start time.
    pub async fn register(&mut self) -> Result<(), EngineError> {
        self.registry.add(&self.identity).await?;
        self.registry
            .set_started(&self.identity, utc_from_epoch_ms(self.clock.epoch_ms()))
            .await?;
        if self.state == WorkerState::Unregistered {
            self.state = WorkerState::Idle;
        }
        tracing::info!(worker = %self.identity, "registered worker");
        Ok(())
    }

    /// Withdraw this worker. A job still recorded as in progress is reported
    /// as a `DirtyExit` failure first. Statistics are left in place.
    pub async fn unregister(&mut self) -> Result<(), EngineError> {
        match self.registry.working_on(&self.identity).await {
            Ok(Some(record)) => {
                let job = record.into_job();
                tracing::warn!(
                    worker = %self.identity,
                    queue = job.queue.as_str(),
                    class = job.class(),
                    job_id = job.log_id(),
                    "unregistering with a job in progress"
                );
                self.fail_job(
                    &job,
                    "DirtyExit",
                    "worker unregistered while the job was in progress",
                )
                .await?;
            }
            Ok(None) => {}
            Err(EngineError::MalformedRecord { source, .. }) => {
                tracing::warn!(worker = %self.identity, error = %source, "discarding unreadable working-on record");
            }
            Err(e) => return Err(e),
        }
        self.registry.remove(&self.identity).await?;
        self.state = WorkerState::Unregistered;
        tracing::info!(worker = %self.identity, "unregistered worker");
        Ok(())
    }

    /// Ask the loop to stop after the current job.
    pub fn shutdown(&mut self) {
        self.shutdown.request();
        if self.state != WorkerState::Unregistered {
            self.state = WorkerState::ShuttingDown;
        }
    }

    pub async fn pause_processing(&mut self) -> Result<(), EngineError> {
        self.registry.set_paused(&self.identity, true).await?;
        tracing::info!(worker = %self.identity, "paused");
        Ok(())
    }

    pub async fn unpause_processing(&mut self) -> Result<(), EngineError> {
        self.registry.set_paused(&self.identity, false).await?;
        if self.state == WorkerState::Paused {
            self.state = WorkerState::Idle;
        }
        tracing::info!(worker = %self.identity, "resumed");
        Ok(())
    }

    pub async fn is_paused(&self) -> Result<bool, EngineError> {
        self.registry.is_paused(&self.identity).await
    }

    /// Remove registrations of dead workers on this host. Never removes this
    /// worker. Returns the identities that were pruned.
    pub async fn prune_dead_workers(&self) -> Result<Vec<WorkerIdentity>, EngineError> {
        self.registry
            .prune_dead(&self.process, Some(&self.identity))
            .await
    }

    /// Record `job` as in progress.
    pub(super) async fn working_on(&mut self, job: &Job) -> Result<(), EngineError> {
        let record = WorkingOn::new(job, utc_from_epoch_ms(self.clock.epoch_ms()));
        self.registry.set_working_on(&self.identity, &record).await?;
        self.state = WorkerState::WorkingOnJob;
        Ok(())
    }

    /// Clear the in-progress record and count the job as processed.
    pub(super) async fn done_working(&mut self) -> Result<(), EngineError> {
        self.registry.clear_working_on(&self.identity).await?;
        self.global_statistic(stat::PROCESSED).incr().await?;
        self.statistic(stat::PROCESSED).incr().await?;
        self.state = WorkerState::Idle;
        Ok(())
    }

    /// Write a failure report and bump both `failed` counters.
    pub(super) async fn fail_job(
        &self,
        job: &Job,
        exception: &str,
        error: &str,
    ) -> Result<(), EngineError> {
        let payload = serde_json::to_value(&job.payload).map_err(|source| EngineError::Encode {
            what: "payload",
            source,
        })?;
        self.report(&job.queue, payload, exception, error).await
    }

    pub(super) async fn report(
        &self,
        queue: &str,
        payload: serde_json::Value,
        exception: &str,
        error: &str,
    ) -> Result<(), EngineError> {
        let record = FailureRecord {
            failed_at: utc_from_epoch_ms(self.clock.epoch_ms()),
            payload,
            exception: exception.to_string(),
            error: error.to_string(),
            worker: self.identity.to_string(),
            queue: queue.to_string(),
        };
        self.failures.report(&record).await?;
        self.global_statistic(stat::FAILED).incr().await?;
        self.statistic(stat::FAILED).incr().await?;
        Ok(())
    }

    /// First `work()` call: clean up after dead workers, then register.
    pub(super) async fn startup(&mut self) -> Result<(), EngineError> {
        let pruned = self.prune_dead_workers().await?;
        if !pruned.is_empty() {
            tracing::info!(count = pruned.len(), "pruned dead workers at startup");
        }
        self.register().await?;
        self.started = true;
        Ok(())
    }

    /// Final step of a requested shutdown.
    pub(super) async fn finish_shutdown(&mut self) -> Result<(), EngineError> {
        tracing::info!(worker = %self.identity, "shutting down");
        self.state = WorkerState::ShuttingDown;
        self.unregister().await?;
        self.registry.erase_statistics(&self.identity).await?;
        Ok(())
    }
}
