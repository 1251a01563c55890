// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store key naming.
//!
//! Every key lives under a single prefix so several applications can share
//! one store:
//!
//! | key                        | type    | contents                          |
//! |----------------------------|---------|-----------------------------------|
//! | `workers`                  | set     | registered worker identities      |
//! | `worker:<id>`              | string  | working-on record (JSON)          |
//! | `worker:<id>:started`      | string  | registration timestamp            |
//! | `worker:<id>:paused`       | string  | present while the worker is paused|
//! | `stat:<name>`              | integer | statistic counter                 |
//! | `queues`                   | set     | known queue names                 |
//! | `queue:<name>`             | list    | pending job payloads (JSON)       |
//! | `failed`                   | list    | failure records (JSON)            |

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "resque:";

/// Builds fully-qualified store keys under a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keys {
    prefix: String,
}

impl Default for Keys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl Keys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, rest: &str) -> String {
        format!("{}{}", self.prefix, rest)
    }

    pub fn workers(&self) -> String {
        self.key("workers")
    }

    pub fn worker(&self, id: &str) -> String {
        self.key(&format!("worker:{id}"))
    }

    pub fn worker_started(&self, id: &str) -> String {
        self.key(&format!("worker:{id}:started"))
    }

    pub fn worker_paused(&self, id: &str) -> String {
        self.key(&format!("worker:{id}:paused"))
    }

    pub fn stat(&self, name: &str) -> String {
        self.key(&format!("stat:{name}"))
    }

    pub fn queues(&self) -> String {
        self.key("queues")
    }

    pub fn queue(&self, name: &str) -> String {
        self.key(&format!("queue:{name}"))
    }

    pub fn failed(&self) -> String {
        self.key("failed")
    }

    /// Recover the queue name from a full `queue:<name>` key, as returned by a
    /// blocking pop.
    pub fn queue_name_from_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.prefix.as_str())?
            .strip_prefix("queue:")
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
