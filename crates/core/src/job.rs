// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job envelopes and the working-on record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a job envelope when it is enqueued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix of at most `n` bytes, for log lines.
    pub fn short(&self, n: usize) -> &str {
        self.0.get(..n).unwrap_or(&self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque job description: the handler to run and its arguments.
///
/// Stored as JSON on the queue list: `{"class":"Mail","args":[{...}],"id":"..."}`.
/// Fields written by other clients (e.g. `queue_time`) are carried through
/// untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub class: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Payload {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            args: Vec::new(),
            id: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = vec![args];
        self
    }

    pub fn with_id(mut self, id: impl Into<JobId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// A payload bound to the queue it was reserved from.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub queue: String,
    pub payload: Payload,
}

impl Job {
    pub fn new(queue: impl Into<String>, payload: Payload) -> Self {
        Self {
            queue: queue.into(),
            payload,
        }
    }

    pub fn class(&self) -> &str {
        &self.payload.class
    }

    pub fn id(&self) -> Option<&JobId> {
        self.payload.id.as_ref()
    }

    /// Id for log lines; `-` when the envelope has none.
    pub fn log_id(&self) -> &str {
        self.id().map(|id| id.short(8)).unwrap_or("-")
    }
}

/// What a worker is executing right now.
///
/// At most one exists per worker. Presence means "busy with this payload";
/// a worker found dead with one of these was killed mid-job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingOn {
    pub queue: String,
    pub run_at: DateTime<Utc>,
    pub payload: Payload,
}

impl WorkingOn {
    pub fn new(job: &Job, run_at: DateTime<Utc>) -> Self {
        Self {
            queue: job.queue.clone(),
            run_at,
            payload: job.payload.clone(),
        }
    }

    pub fn into_job(self) -> Job {
        Job::new(self.queue, self.payload)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
