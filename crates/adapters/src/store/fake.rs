// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FlushScope, StoreAdapter, StoreError};
use async_trait::async_trait;
use indexmap::IndexSet;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Recorded store command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub command: &'static str,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone)]
enum Value {
    Str(String),
    List(VecDeque<String>),
    Set(IndexSet<String>),
}

struct FakeStoreState {
    data: HashMap<String, Value>,
    calls: Vec<StoreCall>,
    connected: bool,
}

/// In-memory store for testing.
///
/// Sets enumerate in insertion order so wildcard queue resolution is
/// deterministic. Clones share the same data.
#[derive(Clone)]
pub struct FakeStore {
    inner: Arc<Mutex<FakeStoreState>>,
    pushed: Arc<Notify>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeStoreState {
                data: HashMap::new(),
                calls: Vec::new(),
                connected: false,
            })),
            pushed: Arc::new(Notify::new()),
        }
    }
}

fn wrong_type(key: &str, expected: &'static str) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
        expected,
    }
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    /// Count recorded calls of one command
    pub fn call_count(&self, command: &str) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.command == command)
            .count()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().connected
    }

    /// All keys currently holding a value, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.lock().data.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn record(state: &mut FakeStoreState, command: &'static str, keys: &[&str]) {
        state.calls.push(StoreCall {
            command,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        });
    }

    fn with_state<T>(
        &self,
        command: &'static str,
        keys: &[&str],
        f: impl FnOnce(&mut HashMap<String, Value>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.inner.lock();
        Self::record(&mut state, command, keys);
        f(&mut state.data)
    }

    fn pop_front(data: &mut HashMap<String, Value>, key: &str) -> Result<Option<String>, StoreError> {
        let (value, now_empty) = match data.get_mut(key) {
            None => return Ok(None),
            Some(Value::List(list)) => (list.pop_front(), list.is_empty()),
            Some(_) => return Err(wrong_type(key, "list")),
        };
        if now_empty {
            data.remove(key);
        }
        Ok(value)
    }

    fn try_pop_any(&self, keys: &[String]) -> Result<Option<(String, String)>, StoreError> {
        let mut state = self.inner.lock();
        for key in keys {
            if let Some(value) = Self::pop_front(&mut state.data, key)? {
                return Ok(Some((key.clone(), value)));
            }
        }
        Ok(None)
    }

    fn add_to_counter(&self, command: &'static str, key: &str, by: i64) -> Result<i64, StoreError> {
        self.with_state(command, &[key], |data| {
            let current = match data.get(key) {
                None => 0,
                Some(Value::Str(s)) => s.parse::<i64>().map_err(|_| wrong_type(key, "integer"))?,
                Some(_) => return Err(wrong_type(key, "integer")),
            };
            let next = current + by;
            data.insert(key.to_string(), Value::Str(next.to_string()));
            Ok(next)
        })
    }
}

#[async_trait]
impl StoreAdapter for FakeStore {
    async fn connect(&self) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        Self::record(&mut state, "connect", &[]);
        state.connected = true;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_state("get", &[key], |data| match data.get(key) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(_) => Err(wrong_type(key, "string")),
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_state("set", &[key], |data| {
            data.insert(key.to_string(), Value::Str(value.to_string()));
            Ok(())
        })
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        self.with_state("del", &[key], |data| Ok(data.remove(key).is_some()))
    }

    async fn incr_by(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        self.add_to_counter("incrby", key, by)
    }

    async fn decr_by(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        self.add_to_counter("decrby", key, -by)
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_state("lpop", &[key], |data| Self::pop_front(data, key))
    }

    async fn blpop(
        &self,
        keys: &[String],
        timeout: Duration,
    ) -> Result<Option<(String, String)>, StoreError> {
        {
            let mut state = self.inner.lock();
            let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            Self::record(&mut state, "blpop", &key_refs);
        }
        let deadline = (!timeout.is_zero()).then(|| tokio::time::Instant::now() + timeout);
        loop {
            // Register for wakeups before checking so a push in between is not lost
            let notified = self.pushed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(hit) = self.try_pop_any(keys)? {
                return Ok(Some(hit));
            }
            match deadline {
                Some(deadline) => {
                    if tokio::time::timeout_at(deadline, notified).await.is_err() {
                        return Ok(None);
                    }
                }
                None => notified.await,
            }
        }
    }

    async fn llen(&self, key: &str) -> Result<u64, StoreError> {
        self.with_state("llen", &[key], |data| match data.get(key) {
            None => Ok(0),
            Some(Value::List(list)) => Ok(list.len() as u64),
            Some(_) => Err(wrong_type(key, "list")),
        })
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<u64, StoreError> {
        let len = self.with_state("rpush", &[key], |data| {
            let entry = data
                .entry(key.to_string())
                .or_insert_with(|| Value::List(VecDeque::new()));
            match entry {
                Value::List(list) => {
                    list.push_back(value.to_string());
                    Ok(list.len() as u64)
                }
                _ => Err(wrong_type(key, "list")),
            }
        })?;
        self.pushed.notify_waiters();
        Ok(len)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        self.with_state("lrange", &[key], |data| {
            let list = match data.get(key) {
                None => return Ok(Vec::new()),
                Some(Value::List(list)) => list,
                Some(_) => return Err(wrong_type(key, "list")),
            };
            let len = list.len() as i64;
            let resolve = |i: i64| if i < 0 { len + i } else { i };
            let start = resolve(start).max(0);
            let stop = resolve(stop).min(len - 1);
            if start > stop {
                return Ok(Vec::new());
            }
            Ok(list
                .iter()
                .skip(start as usize)
                .take((stop - start + 1) as usize)
                .cloned()
                .collect())
        })
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.with_state("sadd", &[key], |data| {
            let entry = data
                .entry(key.to_string())
                .or_insert_with(|| Value::Set(IndexSet::new()));
            match entry {
                Value::Set(set) => Ok(set.insert(member.to_string())),
                _ => Err(wrong_type(key, "set")),
            }
        })
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.with_state("srem", &[key], |data| {
            let (removed, now_empty) = match data.get_mut(key) {
                None => return Ok(false),
                Some(Value::Set(set)) => (set.shift_remove(member), set.is_empty()),
                Some(_) => return Err(wrong_type(key, "set")),
            };
            if now_empty {
                data.remove(key);
            }
            Ok(removed)
        })
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.with_state("sismember", &[key], |data| match data.get(key) {
            None => Ok(false),
            Some(Value::Set(set)) => Ok(set.contains(member)),
            Some(_) => Err(wrong_type(key, "set")),
        })
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.with_state("smembers", &[key], |data| match data.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Set(set)) => Ok(set.iter().cloned().collect()),
            Some(_) => Err(wrong_type(key, "set")),
        })
    }

    async fn flush(&self, _scope: FlushScope) -> Result<(), StoreError> {
        self.with_state("flush", &[], |data| {
            data.clear();
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
