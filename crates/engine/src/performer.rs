// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job execution seam.
//!
//! A worker hands each reserved job to a [`JobPerformer`]. The performer
//! resolves the payload's class to something runnable and reports success
//! or a [`JobError`]; the worker does all the bookkeeping.

use async_trait::async_trait;
use resq_core::Job;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Why a job did not complete
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("no handler registered for class '{0}'")]
    HandlerNotFound(String),
    #[error("{0}")]
    Failed(String),
}

impl JobError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Category recorded as the failure report's `exception`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HandlerNotFound(_) => "HandlerNotFound",
            Self::Failed(_) => "JobFailed",
        }
    }
}

/// Runs a reserved job to completion
#[async_trait]
pub trait JobPerformer: Send + Sync + 'static {
    async fn perform(&self, job: &Job) -> Result<(), JobError>;
}

/// Handler for a single job class
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    async fn handle(&self, job: &Job) -> Result<(), JobError>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> JobHandler for FnHandler<F>
where
    F: Fn(&Job) -> Result<(), JobError> + Send + Sync + 'static,
{
    async fn handle(&self, job: &Job) -> Result<(), JobError> {
        (self.0)(job)
    }
}

/// In-process class → handler table.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for `class`.
    pub fn register(mut self, class: impl Into<String>, handler: impl JobHandler) -> Self {
        self.handlers.insert(class.into(), Arc::new(handler));
        self
    }

    /// Register a synchronous closure as the handler for `class`.
    pub fn register_fn<F>(self, class: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Job) -> Result<(), JobError> + Send + Sync + 'static,
    {
        self.register(class, FnHandler(f))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.handlers.contains_key(class)
    }

    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        classes.sort_unstable();
        classes
    }
}

#[async_trait]
impl JobPerformer for HandlerRegistry {
    async fn perform(&self, job: &Job) -> Result<(), JobError> {
        let handler = self
            .handlers
            .get(job.class())
            .ok_or_else(|| JobError::HandlerNotFound(job.class().to_string()))?;
        handler.handle(job).await
    }
}

#[async_trait]
impl<T: JobPerformer + ?Sized> JobPerformer for Arc<T> {
    async fn perform(&self, job: &Job) -> Result<(), JobError> {
        (**self).perform(job).await
    }
}

#[cfg(test)]
#[path = "performer_tests.rs"]
mod tests;
