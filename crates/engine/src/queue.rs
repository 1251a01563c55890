// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named FIFO job queues.
//!
//! Producers append to the tail, workers pop from the head. Every queue a job
//! was ever pushed to is remembered in the `queues` set, which is what a
//! wildcard worker polls.

use crate::error::EngineError;
use resq_adapters::StoreAdapter;
use resq_core::{IdGen, Job, Keys, Payload, UuidIdGen, WILDCARD};
use std::time::Duration;

/// Queue operations over a store.
#[derive(Clone)]
pub struct QueueRegistry<S, G = UuidIdGen> {
    store: S,
    keys: Keys,
    ids: G,
}

impl<S: StoreAdapter> QueueRegistry<S, UuidIdGen> {
    pub fn new(store: S, keys: Keys) -> Self {
        Self::with_id_gen(store, keys, UuidIdGen)
    }
}

impl<S: StoreAdapter, G: IdGen> QueueRegistry<S, G> {
    pub fn with_id_gen(store: S, keys: Keys, ids: G) -> Self {
        Self { store, keys, ids }
    }

    /// Append a job to the tail of `queue`, assigning an id if it has none.
    pub async fn enqueue(&self, queue: &str, mut payload: Payload) -> Result<Job, EngineError> {
        validate_queue_name(queue)?;
        if payload.id.is_none() {
            payload.id = Some(self.ids.next().into());
        }
        let raw = payload.encode().map_err(|source| EngineError::Encode {
            what: "payload",
            source,
        })?;
        self.store.sadd(&self.keys.queues(), queue).await?;
        self.store.rpush(&self.keys.queue(queue), &raw).await?;
        let job = Job::new(queue, payload);
        tracing::debug!(queue, class = job.class(), job_id = job.log_id(), "enqueued job");
        Ok(job)
    }

    /// Pending jobs on `queue`.
    pub async fn length(&self, queue: &str) -> Result<u64, EngineError> {
        Ok(self.store.llen(&self.keys.queue(queue)).await?)
    }

    /// Every known queue name, in store order.
    pub async fn queues(&self) -> Result<Vec<String>, EngineError> {
        Ok(self.store.smembers(&self.keys.queues()).await?)
    }

    /// Pop the head of `queue` without blocking.
    ///
    /// A payload that fails to decode is still consumed and comes back as
    /// [`EngineError::MalformedPayload`] carrying the raw text.
    pub async fn pop(&self, queue: &str) -> Result<Option<Job>, EngineError> {
        match self.store.lpop(&self.keys.queue(queue)).await? {
            Some(raw) => decode(queue, raw).map(Some),
            None => Ok(None),
        }
    }

    /// Wait up to `timeout` for the head of the first non-empty queue.
    pub async fn blocking_pop_any(
        &self,
        queues: &[String],
        timeout: Duration,
    ) -> Result<Option<Job>, EngineError> {
        if queues.is_empty() {
            return Ok(None);
        }
        let keys: Vec<String> = queues.iter().map(|q| self.keys.queue(q)).collect();
        let Some((key, raw)) = self.store.blpop(&keys, timeout).await? else {
            return Ok(None);
        };
        let queue = self
            .keys
            .queue_name_from_key(&key)
            .map(str::to_string)
            .unwrap_or(key);
        decode(&queue, raw).map(Some)
    }

    /// Forget a queue and drop its pending jobs. Returns how many were dropped.
    pub async fn remove_queue(&self, queue: &str) -> Result<u64, EngineError> {
        let key = self.keys.queue(queue);
        let dropped = self.store.llen(&key).await?;
        self.store.del(&key).await?;
        self.store.srem(&self.keys.queues(), queue).await?;
        tracing::info!(queue, dropped, "removed queue");
        Ok(dropped)
    }
}

fn decode(queue: &str, raw: String) -> Result<Job, EngineError> {
    match Payload::decode(&raw) {
        Ok(payload) => Ok(Job::new(queue, payload)),
        Err(source) => Err(EngineError::MalformedPayload {
            queue: queue.to_string(),
            raw,
            source,
        }),
    }
}

/// Queue names end up comma-joined inside worker identities, so they can't
/// contain `,` or whitespace, be blank, or be the wildcard.
pub fn validate_queue_name(name: &str) -> Result<(), EngineError> {
    let bad = name.trim().is_empty()
        || name == WILDCARD
        || name.contains(',')
        || name.chars().any(char::is_whitespace);
    if bad {
        return Err(EngineError::InvalidQueueName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
