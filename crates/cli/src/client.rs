// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store connection shared by every subcommand.

use anyhow::{Context, Result};
use resq_adapters::{RedisStore, StoreAdapter, TracedStore};
use resq_core::{Keys, DEFAULT_PREFIX};
use resq_engine::{FailureLog, QueueRegistry, Statistic, WorkerRegistry};

pub type Store = TracedStore<RedisStore>;

/// Connected store plus the key layout in use.
pub struct Client {
    pub store: Store,
    pub keys: Keys,
}

impl Client {
    /// Connect using `RESQ_REDIS_URL` and `RESQ_PREFIX`.
    pub async fn connect() -> Result<Self> {
        let url = crate::env::redis_url();
        let store = RedisStore::open(&url).with_context(|| format!("invalid store URL {url}"))?;
        let store = TracedStore::new(store);
        store
            .connect()
            .await
            .with_context(|| format!("failed to connect to {url}"))?;
        let prefix = resq_engine::env::prefix().unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        Ok(Self {
            store,
            keys: Keys::new(prefix),
        })
    }

    pub fn queues(&self) -> QueueRegistry<Store> {
        QueueRegistry::new(self.store.clone(), self.keys.clone())
    }

    pub fn registry(&self) -> WorkerRegistry<Store> {
        WorkerRegistry::new(self.store.clone(), self.keys.clone())
    }

    pub fn failures(&self) -> FailureLog<Store> {
        FailureLog::new(self.store.clone(), self.keys.clone())
    }

    pub fn statistic(&self, name: &str) -> Statistic<Store> {
        Statistic::new(self.store.clone(), &self.keys, name)
    }
}
