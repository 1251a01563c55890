// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value store adapters

mod redis;

pub use self::redis::RedisStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStore, StoreCall};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("command {command} failed: {message}")]
    Command {
        command: &'static str,
        message: String,
    },
    #[error("wrong type for key '{key}': expected {expected}")]
    WrongType { key: String, expected: &'static str },
}

/// How much of the store a flush clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushScope {
    /// The currently selected database.
    Database,
    /// Every database on the server.
    All,
}

/// Capability contract over the shared key-value store.
///
/// Each call is one atomic store command; callers rely on that for
/// mutual exclusion (a popped element goes to exactly one caller) and for
/// counter updates. Keys are passed fully qualified.
#[async_trait]
pub trait StoreAdapter: Clone + Send + Sync + 'static {
    /// Establish (or verify) the connection to the store.
    async fn connect(&self) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Returns whether it existed.
    async fn del(&self, key: &str) -> Result<bool, StoreError>;

    /// Add `by` to an integer key (missing keys start at 0), returning the new value.
    async fn incr_by(&self, key: &str, by: i64) -> Result<i64, StoreError>;

    /// Subtract `by` from an integer key, returning the new value.
    async fn decr_by(&self, key: &str, by: i64) -> Result<i64, StoreError>;

    /// Remove and return the head of a list, if any.
    async fn lpop(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Block until one of `keys` has an element, popping from the first
    /// non-empty list. Returns `(key, value)`, or `None` once `timeout`
    /// elapses. A zero timeout waits indefinitely.
    async fn blpop(
        &self,
        keys: &[String],
        timeout: Duration,
    ) -> Result<Option<(String, String)>, StoreError>;

    async fn llen(&self, key: &str) -> Result<u64, StoreError>;

    /// Append to the tail of a list, returning the new length.
    async fn rpush(&self, key: &str, value: &str) -> Result<u64, StoreError>;

    /// Elements `start..=stop` of a list; negative indices count from the tail.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError>;

    /// Add to a set. Returns whether the member was new.
    async fn sadd(&self, key: &str, member: &str) -> Result<bool, StoreError>;

    /// Remove from a set. Returns whether the member was present.
    async fn srem(&self, key: &str, member: &str) -> Result<bool, StoreError>;

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, StoreError>;

    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError>;

    async fn flush(&self, scope: FlushScope) -> Result<(), StoreError>;
}
