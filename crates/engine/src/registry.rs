// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The set of live workers and their per-worker records.
//!
//! An identity in the `workers` set means "this worker claims to be alive".
//! Alongside it each worker may have a working-on record, a start timestamp
//! and a pause flag. Removing a worker removes all of those together.

use crate::error::EngineError;
use crate::stat::{self, Statistic};
use chrono::{DateTime, Utc};
use resq_adapters::{ProcessAdapter, StoreAdapter};
use resq_core::{Keys, WorkerIdentity, WorkingOn};

#[derive(Clone)]
pub struct WorkerRegistry<S> {
    store: S,
    keys: Keys,
}

impl<S: StoreAdapter> WorkerRegistry<S> {
    pub fn new(store: S, keys: Keys) -> Self {
        Self { store, keys }
    }

    pub async fn add(&self, worker: &WorkerIdentity) -> Result<(), EngineError> {
        self.store
            .sadd(&self.keys.workers(), &worker.to_string())
            .await?;
        Ok(())
    }

    /// Drop the identity and every per-worker record except statistics.
    /// Returns whether the identity was registered.
    pub async fn remove(&self, worker: &WorkerIdentity) -> Result<bool, EngineError> {
        let id = worker.to_string();
        let existed = self.store.srem(&self.keys.workers(), &id).await?;
        self.store.del(&self.keys.worker(&id)).await?;
        self.store.del(&self.keys.worker_started(&id)).await?;
        self.store.del(&self.keys.worker_paused(&id)).await?;
        Ok(existed)
    }

    pub async fn exists(&self, worker: &WorkerIdentity) -> Result<bool, EngineError> {
        Ok(self
            .store
            .sismember(&self.keys.workers(), &worker.to_string())
            .await?)
    }

    /// Every registered identity. Entries that don't parse are skipped.
    pub async fn all(&self) -> Result<Vec<WorkerIdentity>, EngineError> {
        let raw = self.store.smembers(&self.keys.workers()).await?;
        let mut out = Vec::with_capacity(raw.len());
        for entry in raw {
            match entry.parse::<WorkerIdentity>() {
                Ok(id) => out.push(id),
                Err(e) => tracing::warn!(entry = entry.as_str(), error = %e, "skipping malformed worker identity"),
            }
        }
        Ok(out)
    }

    pub async fn set_working_on(
        &self,
        worker: &WorkerIdentity,
        record: &WorkingOn,
    ) -> Result<(), EngineError> {
        let raw = serde_json::to_string(record).map_err(|source| EngineError::Encode {
            what: "working-on record",
            source,
        })?;
        self.store
            .set(&self.keys.worker(&worker.to_string()), &raw)
            .await?;
        Ok(())
    }

    pub async fn clear_working_on(&self, worker: &WorkerIdentity) -> Result<bool, EngineError> {
        Ok(self
            .store
            .del(&self.keys.worker(&worker.to_string()))
            .await?)
    }

    pub async fn working_on(
        &self,
        worker: &WorkerIdentity,
    ) -> Result<Option<WorkingOn>, EngineError> {
        let id = worker.to_string();
        let Some(raw) = self.store.get(&self.keys.worker(&id)).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| EngineError::MalformedRecord { worker: id, source })
    }

    pub async fn set_started(
        &self,
        worker: &WorkerIdentity,
        at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        self.store
            .set(
                &self.keys.worker_started(&worker.to_string()),
                &at.to_rfc3339(),
            )
            .await?;
        Ok(())
    }

    pub async fn started(
        &self,
        worker: &WorkerIdentity,
    ) -> Result<Option<DateTime<Utc>>, EngineError> {
        let raw = self
            .store
            .get(&self.keys.worker_started(&worker.to_string()))
            .await?;
        Ok(raw
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|t| t.with_timezone(&Utc)))
    }

    pub async fn set_paused(
        &self,
        worker: &WorkerIdentity,
        paused: bool,
    ) -> Result<(), EngineError> {
        let key = self.keys.worker_paused(&worker.to_string());
        if paused {
            self.store.set(&key, "1").await?;
        } else {
            self.store.del(&key).await?;
        }
        Ok(())
    }

    pub async fn is_paused(&self, worker: &WorkerIdentity) -> Result<bool, EngineError> {
        Ok(self
            .store
            .get(&self.keys.worker_paused(&worker.to_string()))
            .await?
            .is_some())
    }

    /// Delete the per-worker `processed` and `failed` counters.
    pub async fn erase_statistics(&self, worker: &WorkerIdentity) -> Result<(), EngineError> {
        for name in [stat::PROCESSED, stat::FAILED] {
            Statistic::new(self.store.clone(), &self.keys, stat::worker_stat(name, worker))
                .clear()
                .await?;
        }
        Ok(())
    }

    /// Remove registrations left behind by dead processes on this host.
    ///
    /// Identities on other hosts are never touched: their liveness can't be
    /// checked from here. `keep` is never pruned. A pruned worker's in-flight
    /// job is dropped without a failure report.
    pub async fn prune_dead<P: ProcessAdapter>(
        &self,
        process: &P,
        keep: Option<&WorkerIdentity>,
    ) -> Result<Vec<WorkerIdentity>, EngineError> {
        let host = process.hostname();
        let mut pruned = Vec::new();
        for worker in self.all().await? {
            if !worker.is_on_host(&host) || Some(&worker) == keep {
                continue;
            }
            if process.is_alive(worker.pid()) {
                continue;
            }
            if let Ok(Some(record)) = self.working_on(&worker).await {
                tracing::warn!(
                    worker = %worker,
                    queue = record.queue.as_str(),
                    class = record.payload.class.as_str(),
                    "dead worker was mid-job, dropping its job"
                );
            }
            self.remove(&worker).await?;
            self.erase_statistics(&worker).await?;
            tracing::info!(worker = %worker, "pruned dead worker");
            pruned.push(worker);
        }
        Ok(pruned)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
