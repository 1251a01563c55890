// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker identity.
//!
//! The parsed `(host, pid, queues)` triple is the canonical value; the
//! `host:pid:queue,queue` string is derived from it and used as the registry
//! key and in logs. An identity parsed from the registry keeps the exact
//! string it was read from, so records written by other workers are
//! addressed under the key they were stored with.

use crate::queue::QueueList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors parsing a worker identity string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("malformed worker identity '{0}': expected host:pid:queues")]
    Malformed(String),
    #[error("invalid pid '{pid}' in worker identity '{identity}'")]
    InvalidPid { identity: String, pid: String },
}

/// Identifies one worker process: the host it runs on, its OS process id and
/// the queues it polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkerIdentity {
    host: String,
    pid: u32,
    queues: QueueList,
    wire: String,
}

impl WorkerIdentity {
    pub fn new(host: impl Into<String>, pid: u32, queues: QueueList) -> Self {
        let host = host.into();
        let wire = format!("{host}:{pid}:{queues}");
        Self {
            host,
            pid,
            queues,
            wire,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn queues(&self) -> &QueueList {
        &self.queues
    }

    /// True when this identity claims to run on `host`.
    pub fn is_on_host(&self, host: &str) -> bool {
        self.host == host
    }
}

impl fmt::Display for WorkerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire)
    }
}

impl FromStr for WorkerIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(host), Some(pid), Some(queues)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(IdentityError::Malformed(s.to_string()));
        };
        if host.is_empty() {
            return Err(IdentityError::Malformed(s.to_string()));
        }
        let pid = pid.parse::<u32>().map_err(|_| IdentityError::InvalidPid {
            identity: s.to_string(),
            pid: pid.to_string(),
        })?;
        Ok(Self {
            host: host.to_string(),
            pid,
            queues: QueueList::parse(queues),
            wire: s.to_string(),
        })
    }
}

impl TryFrom<String> for WorkerIdentity {
    type Error = IdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WorkerIdentity> for String {
    fn from(id: WorkerIdentity) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
