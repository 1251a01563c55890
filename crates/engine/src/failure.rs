// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `failed` list: one JSON [`FailureRecord`] per failed job.

use crate::error::EngineError;
use resq_adapters::StoreAdapter;
use resq_core::{FailureRecord, Keys};

#[derive(Clone)]
pub struct FailureLog<S> {
    store: S,
    keys: Keys,
}

impl<S: StoreAdapter> FailureLog<S> {
    pub fn new(store: S, keys: Keys) -> Self {
        Self { store, keys }
    }

    pub async fn report(&self, record: &FailureRecord) -> Result<(), EngineError> {
        let raw = serde_json::to_string(record).map_err(|source| EngineError::Encode {
            what: "failure record",
            source,
        })?;
        self.store.rpush(&self.keys.failed(), &raw).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, EngineError> {
        Ok(self.store.llen(&self.keys.failed()).await?)
    }

    /// Up to `count` records starting at `start`, oldest first.
    /// Records that no longer decode are skipped.
    pub async fn list(&self, start: u64, count: u64) -> Result<Vec<FailureRecord>, EngineError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let first = i64::try_from(start).unwrap_or(i64::MAX);
        let last = first.saturating_add(i64::try_from(count).unwrap_or(i64::MAX) - 1);
        let raw = self.store.lrange(&self.keys.failed(), first, last).await?;
        Ok(raw
            .iter()
            .filter_map(|entry| match serde_json::from_str(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable failure record");
                    None
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
