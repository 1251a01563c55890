//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};

/// Nothing listens here, so any command that reaches the store fails fast.
pub const UNREACHABLE_STORE: &str = "redis://127.0.0.1:1";

/// Path to the built `resq` binary.
///
/// Checks the llvm-cov target directory first, then the standard one, then
/// falls back to the directory of the test binary itself.
fn resq_binary() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug/resq");
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug/resq");
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join("resq");
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// Fluent wrapper over `assert_cmd::Command`.
pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    fn new() -> Self {
        let mut cmd = assert_cmd::Command::new(resq_binary());
        cmd.env("RESQ_REDIS_URL", UNREACHABLE_STORE)
            .env_remove("RESQ_HANDLERS")
            .env_remove("RESQ_LOG_FILE")
            .env_remove("RESQ_PREFIX")
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "warn")
            .timeout(std::time::Duration::from_secs(10));
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and expect exit code 0.
    pub fn passes(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let out = RunOutput::from(output);
        assert!(
            out.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            out.stdout, out.stderr
        );
        out
    }

    /// Run and expect a non-zero exit code.
    pub fn fails(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let out = RunOutput::from(output);
        assert!(
            !out.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            out.stdout, out.stderr
        );
        out
    }
}

pub struct RunOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunOutput {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {needle:?}:\n{}",
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {needle:?}:\n{}",
            self.stderr
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn exit_code(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "stderr:\n{}", self.stderr);
        self
    }
}

/// Temporary directory holding a handler file.
pub struct HandlerFile {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl HandlerFile {
    pub fn new(content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handlers.toml");
        std::fs::write(&path, content).unwrap();
        Self { dir, path }
    }

    pub fn path(&self) -> &str {
        self.path.to_str().unwrap()
    }
}
