// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named integer counters kept in the store.
//!
//! Every update is a single `INCRBY`/`DECRBY` round trip, so workers bumping
//! the same global counter never lose updates. There are no cross-counter
//! transactions.

use crate::error::EngineError;
use resq_adapters::StoreAdapter;
use resq_core::{Keys, WorkerIdentity};

/// Jobs a worker finished, successfully or not.
pub const PROCESSED: &str = "processed";

/// Jobs that failed (handler error, unknown handler, dirty exit).
pub const FAILED: &str = "failed";

/// Name of the per-worker variant of a statistic: `<name>:<identity>`.
pub fn worker_stat(name: &str, worker: &WorkerIdentity) -> String {
    format!("{name}:{worker}")
}

/// Handle to one counter.
#[derive(Clone)]
pub struct Statistic<S> {
    store: S,
    name: String,
    key: String,
}

impl<S: StoreAdapter> Statistic<S> {
    pub fn new(store: S, keys: &Keys, name: impl Into<String>) -> Self {
        let name = name.into();
        let key = keys.stat(&name);
        Self { store, name, key }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn incr(&self) -> Result<i64, EngineError> {
        self.incr_by(1).await
    }

    pub async fn incr_by(&self, by: i64) -> Result<i64, EngineError> {
        Ok(self.store.incr_by(&self.key, by).await?)
    }

    pub async fn decr(&self) -> Result<i64, EngineError> {
        self.decr_by(1).await
    }

    pub async fn decr_by(&self, by: i64) -> Result<i64, EngineError> {
        Ok(self.store.decr_by(&self.key, by).await?)
    }

    /// Current value; 0 when the counter was never set or was cleared.
    pub async fn get(&self) -> Result<i64, EngineError> {
        let raw = self.store.get(&self.key).await?;
        Ok(match raw {
            None => 0,
            Some(s) => s.parse().unwrap_or_else(|_| {
                tracing::warn!(stat = self.name.as_str(), value = s.as_str(), "non-integer statistic");
                0
            }),
        })
    }

    /// Delete the counter. Returns whether it existed.
    pub async fn clear(&self) -> Result<bool, EngineError> {
        Ok(self.store.del(&self.key).await?)
    }
}

#[cfg(test)]
#[path = "stat_tests.rs"]
mod tests;
