// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the worker engine

use resq_adapters::StoreError;
use resq_core::IdentityError;
use thiserror::Error;

/// Errors that can occur while reserving, recording or accounting for jobs
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("invalid worker identity: {0}")]
    Identity(#[from] IdentityError),
    #[error("invalid queue name '{0}'")]
    InvalidQueueName(String),
    #[error("malformed payload on queue '{queue}': {source}")]
    MalformedPayload {
        queue: String,
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed working-on record for worker '{worker}': {source}")]
    MalformedRecord {
        worker: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
