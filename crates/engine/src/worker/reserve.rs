// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Taking the next job off this worker's queues.

use super::Worker;
use crate::error::EngineError;
use crate::performer::JobPerformer;
use resq_adapters::{ProcessAdapter, StoreAdapter};
use resq_core::{Clock, Job, QueueList};
use std::time::Duration;

impl<S, P, J, C> Worker<S, P, J, C>
where
    S: StoreAdapter,
    P: ProcessAdapter,
    J: JobPerformer,
    C: Clock,
{
    /// Queues to poll, in priority order. The wildcard is resolved against
    /// the known-queue set on every call.
    pub async fn queues(&self) -> Result<Vec<String>, EngineError> {
        match self.identity.queues() {
            QueueList::All => self.queues.queues().await,
            QueueList::Named(names) => Ok(names.clone()),
        }
    }

    /// Pop the head of the highest-priority non-empty queue.
    ///
    /// Queues are tried in order without waiting. If all are empty and
    /// `blocking` is set, waits up to `timeout` on all of them at once.
    /// A blocking reserve with nothing to poll (a wildcard before any queue
    /// exists) sleeps out the timeout instead.
    /// The atomic pop guarantees no other worker receives the same job.
    pub async fn reserve(
        &self,
        blocking: bool,
        timeout: Duration,
    ) -> Result<Option<Job>, EngineError> {
        let queues = self.queues().await?;
        if queues.is_empty() {
            tracing::debug!(worker = %self.identity, "no queues to poll");
            if blocking {
                tokio::time::sleep(timeout).await;
            }
            return Ok(None);
        }

        for queue in &queues {
            tracing::trace!(queue = queue.as_str(), "checking queue");
            if let Some(job) = self.queues.pop(queue).await? {
                tracing::debug!(queue = queue.as_str(), class = job.class(), "found job");
                return Ok(Some(job));
            }
        }

        // A zero BLPOP timeout waits forever; treat it as "don't wait".
        if blocking && !timeout.is_zero() {
            let job = self.queues.blocking_pop_any(&queues, timeout).await?;
            if let Some(job) = &job {
                tracing::debug!(queue = job.queue.as_str(), class = job.class(), "found job");
            }
            return Ok(job);
        }
        Ok(None)
    }
}
