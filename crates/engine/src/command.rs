// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Performer that runs each job class as a shell command.
//!
//! Handler file format:
//!
//! ```toml
//! timeout_secs = 300            # optional default for every handler
//!
//! [handlers]
//! Mail = "bin/deliver-mail"
//! Report = { run = "bin/report", timeout_secs = 60 }
//! ```
//!
//! The command runs under `sh -c` with `RESQ_JOB_ID`, `RESQ_QUEUE`,
//! `RESQ_CLASS` and `RESQ_ARGS` (the args array as JSON) set.

use crate::performer::{JobError, JobPerformer};
use async_trait::async_trait;
use resq_adapters::subprocess::{run_with_timeout, JOB_COMMAND_TIMEOUT};
use resq_core::Job;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Errors loading a handler file
#[derive(Debug, Error)]
pub enum PerformerConfigError {
    #[error("failed to read handler file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid handler file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("handler '{0}' has an empty command")]
    EmptyCommand(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HandlerFile {
    timeout_secs: Option<u64>,
    #[serde(default)]
    handlers: HashMap<String, HandlerDef>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HandlerDef {
    Command(String),
    Table {
        run: String,
        timeout_secs: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CommandDef {
    run: String,
    timeout: Duration,
}

/// Runs jobs as shell commands looked up by class.
#[derive(Debug, Clone, Default)]
pub struct CommandPerformer {
    handlers: HashMap<String, CommandDef>,
}

impl CommandPerformer {
    pub fn load(path: &Path) -> Result<Self, PerformerConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| PerformerConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, PerformerConfigError> {
        let file: HandlerFile = toml::from_str(content)?;
        let default_timeout = file
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(JOB_COMMAND_TIMEOUT);
        let mut handlers = HashMap::new();
        for (class, def) in file.handlers {
            let (run, timeout) = match def {
                HandlerDef::Command(run) => (run, default_timeout),
                HandlerDef::Table { run, timeout_secs } => (
                    run,
                    timeout_secs.map(Duration::from_secs).unwrap_or(default_timeout),
                ),
            };
            if run.trim().is_empty() {
                return Err(PerformerConfigError::EmptyCommand(class));
            }
            handlers.insert(class, CommandDef { run, timeout });
        }
        Ok(Self { handlers })
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Timeout applied to `class`, if it has a handler.
    pub fn timeout_for(&self, class: &str) -> Option<Duration> {
        self.handlers.get(class).map(|def| def.timeout)
    }
}

#[async_trait]
impl JobPerformer for CommandPerformer {
    async fn perform(&self, job: &Job) -> Result<(), JobError> {
        let def = self
            .handlers
            .get(job.class())
            .ok_or_else(|| JobError::HandlerNotFound(job.class().to_string()))?;

        let args = serde_json::to_string(&job.payload.args)
            .map_err(|e| JobError::failed(format!("failed to encode args: {e}")))?;
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(&def.run)
            .env("RESQ_JOB_ID", job.id().map(|id| id.as_str()).unwrap_or(""))
            .env("RESQ_QUEUE", &job.queue)
            .env("RESQ_CLASS", job.class())
            .env("RESQ_ARGS", args)
            .stdin(std::process::Stdio::null());

        let description = format!("handler for {}", job.class());
        let output = run_with_timeout(cmd, def.timeout, &description)
            .await
            .map_err(JobError::Failed)?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let status = match output.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "killed by signal".to_string(),
        };
        Err(JobError::Failed(if stderr.is_empty() {
            format!("{description} failed with {status}")
        } else {
            format!("{description} failed with {status}: {stderr}")
        }))
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
