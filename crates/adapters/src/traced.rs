// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::store::{FlushScope, StoreAdapter, StoreError};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Wrapper that adds tracing to any StoreAdapter
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

/// Log a failed command; successes are logged by the caller at trace level.
fn log_failure<T>(command: &str, key: &str, result: &Result<T, StoreError>) {
    if let Err(e) = result {
        tracing::error!(command, key, error = %e, "store command failed");
    }
}

#[async_trait]
impl<S: StoreAdapter> StoreAdapter for TracedStore<S> {
    async fn connect(&self) -> Result<(), StoreError> {
        async {
            let start = Instant::now();
            let result = self.inner.connect().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "connected"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "connect failed"),
            }
            result
        }
        .instrument(tracing::info_span!("store.connect"))
        .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let result = self.inner.get(key).await;
        tracing::trace!(key, hit = ?result.as_ref().ok().map(Option::is_some), "get");
        log_failure("get", key, &result);
        result
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let result = self.inner.set(key, value).await;
        tracing::trace!(key, value_len = value.len(), "set");
        log_failure("set", key, &result);
        result
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        let result = self.inner.del(key).await;
        tracing::trace!(key, existed = ?result.as_ref().ok(), "del");
        log_failure("del", key, &result);
        result
    }

    async fn incr_by(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        let result = self.inner.incr_by(key, by).await;
        tracing::trace!(key, by, value = ?result.as_ref().ok(), "incrby");
        log_failure("incrby", key, &result);
        result
    }

    async fn decr_by(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        let result = self.inner.decr_by(key, by).await;
        tracing::trace!(key, by, value = ?result.as_ref().ok(), "decrby");
        log_failure("decrby", key, &result);
        result
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>, StoreError> {
        let result = self.inner.lpop(key).await;
        tracing::trace!(key, popped = ?result.as_ref().ok().map(Option::is_some), "lpop");
        log_failure("lpop", key, &result);
        result
    }

    async fn blpop(
        &self,
        keys: &[String],
        timeout: Duration,
    ) -> Result<Option<(String, String)>, StoreError> {
        async {
            tracing::debug!(keys = keys.len(), "waiting");
            let start = Instant::now();
            let result = self.inner.blpop(keys, timeout).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(Some((key, _))) => tracing::debug!(key = key.as_str(), elapsed_ms, "popped"),
                Ok(None) => tracing::debug!(elapsed_ms, "timed out"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "blpop failed"),
            }
            result
        }
        .instrument(tracing::debug_span!("store.blpop", timeout_ms = timeout.as_millis() as u64))
        .await
    }

    async fn llen(&self, key: &str) -> Result<u64, StoreError> {
        let result = self.inner.llen(key).await;
        log_failure("llen", key, &result);
        result
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<u64, StoreError> {
        let result = self.inner.rpush(key, value).await;
        tracing::trace!(key, len = ?result.as_ref().ok(), "rpush");
        log_failure("rpush", key, &result);
        result
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let result = self.inner.lrange(key, start, stop).await;
        log_failure("lrange", key, &result);
        result
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let result = self.inner.sadd(key, member).await;
        tracing::trace!(key, member, added = ?result.as_ref().ok(), "sadd");
        log_failure("sadd", key, &result);
        result
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let result = self.inner.srem(key, member).await;
        tracing::trace!(key, member, removed = ?result.as_ref().ok(), "srem");
        log_failure("srem", key, &result);
        result
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let result = self.inner.sismember(key, member).await;
        log_failure("sismember", key, &result);
        result
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let result = self.inner.smembers(key).await;
        log_failure("smembers", key, &result);
        result
    }

    async fn flush(&self, scope: FlushScope) -> Result<(), StoreError> {
        let result = self.inner.flush(scope).await;
        tracing::info_span!("store.flush", ?scope).in_scope(|| match &result {
            Ok(()) => tracing::warn!("flushed"),
            Err(e) => tracing::error!(error = %e, "flush failed"),
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
