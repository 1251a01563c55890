// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure reports appended to the `failed` list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One failed job, as stored on the `failed` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub failed_at: DateTime<Utc>,
    /// The job payload, or the raw text if it could not be decoded.
    pub payload: serde_json::Value,
    /// Failure category, e.g. `HandlerNotFound` or `DirtyExit`.
    pub exception: String,
    pub error: String,
    pub worker: String,
    pub queue: String,
}
