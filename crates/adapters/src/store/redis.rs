// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed store

use super::{FlushScope, StoreAdapter, StoreError};
use ::redis::aio::{ConnectionManager, MultiplexedConnection};
use ::redis::{Client, Cmd, FromRedisValue};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};

/// Store adapter speaking to a Redis server.
///
/// The connection is opened lazily on first use (or by [`StoreAdapter::connect`])
/// and shared by clones; the connection manager reconnects after drops.
/// `BLPOP` holds its connection for the whole wait, so it runs on a second,
/// dedicated connection that is kept until it fails.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    conn: Arc<OnceCell<ConnectionManager>>,
    blocking: Arc<Mutex<Option<MultiplexedConnection>>>,
}

impl RedisStore {
    /// Create an adapter for `url` (e.g. `redis://127.0.0.1:6379/0`).
    ///
    /// Only validates the URL; no connection is made yet.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            conn: Arc::new(OnceCell::new()),
            blocking: Arc::new(Mutex::new(None)),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| StoreError::Connection(e.to_string()))
            })
            .await?;
        Ok(conn.clone())
    }

    async fn blocking_connection(&self) -> Result<MultiplexedConnection, StoreError> {
        let mut slot = self.blocking.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }
        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        *slot = Some(conn.clone());
        Ok(conn)
    }

    async fn query<T: FromRedisValue>(
        &self,
        command: &'static str,
        cmd: &Cmd,
    ) -> Result<T, StoreError> {
        let mut conn = self.connection().await?;
        cmd.query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Command {
                command,
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl StoreAdapter for RedisStore {
    async fn connect(&self) -> Result<(), StoreError> {
        // The connection manager retries its first connect with backoff;
        // probe with a plain connection so an unreachable server fails fast.
        let mut probe = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let _: () = ::redis::cmd("PING")
            .query_async(&mut probe)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        self.connection().await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.query("GET", ::redis::cmd("GET").arg(key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _: () = self.query("SET", ::redis::cmd("SET").arg(key).arg(value)).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        let removed: i64 = self.query("DEL", ::redis::cmd("DEL").arg(key)).await?;
        Ok(removed > 0)
    }

    async fn incr_by(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        self.query("INCRBY", ::redis::cmd("INCRBY").arg(key).arg(by))
            .await
    }

    async fn decr_by(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        self.query("DECRBY", ::redis::cmd("DECRBY").arg(key).arg(by))
            .await
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.query("LPOP", ::redis::cmd("LPOP").arg(key)).await
    }

    async fn blpop(
        &self,
        keys: &[String],
        timeout: Duration,
    ) -> Result<Option<(String, String)>, StoreError> {
        if keys.is_empty() {
            return Ok(None);
        }
        let mut conn = self.blocking_connection().await?;
        let reply: ::redis::RedisResult<Option<(String, String)>> = ::redis::cmd("BLPOP")
            .arg(keys)
            .arg(timeout.as_secs_f64())
            .query_async(&mut conn)
            .await;
        match reply {
            Ok(hit) => Ok(hit),
            Err(e) => {
                if e.is_io_error() || e.is_connection_dropped() {
                    // Reopened on the next call.
                    *self.blocking.lock().await = None;
                }
                Err(StoreError::Command {
                    command: "BLPOP",
                    message: e.to_string(),
                })
            }
        }
    }

    async fn llen(&self, key: &str) -> Result<u64, StoreError> {
        self.query("LLEN", ::redis::cmd("LLEN").arg(key)).await
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<u64, StoreError> {
        self.query("RPUSH", ::redis::cmd("RPUSH").arg(key).arg(value))
            .await
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        self.query(
            "LRANGE",
            ::redis::cmd("LRANGE").arg(key).arg(start).arg(stop),
        )
        .await
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let added: i64 = self
            .query("SADD", ::redis::cmd("SADD").arg(key).arg(member))
            .await?;
        Ok(added > 0)
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let removed: i64 = self
            .query("SREM", ::redis::cmd("SREM").arg(key).arg(member))
            .await?;
        Ok(removed > 0)
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.query("SISMEMBER", ::redis::cmd("SISMEMBER").arg(key).arg(member))
            .await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.query("SMEMBERS", ::redis::cmd("SMEMBERS").arg(key))
            .await
    }

    async fn flush(&self, scope: FlushScope) -> Result<(), StoreError> {
        let (name, cmd) = match scope {
            FlushScope::Database => ("FLUSHDB", ::redis::cmd("FLUSHDB")),
            FlushScope::All => ("FLUSHALL", ::redis::cmd("FLUSHALL")),
        };
        let _: () = self.query(name, &cmd).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "redis_tests.rs"]
mod tests;
