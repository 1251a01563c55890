// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

#[tokio::test]
async fn captures_stdout_and_env() {
    let mut cmd = sh("echo \"$GREETING\"");
    cmd.env("GREETING", "hello");
    let output = run_with_timeout(cmd, Duration::from_secs(5), "greet")
        .await
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[tokio::test]
async fn nonzero_exit_is_not_an_error() {
    let output = run_with_timeout(sh("echo boom >&2; exit 3"), Duration::from_secs(5), "fail")
        .await
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(String::from_utf8_lossy(&output.stderr).trim(), "boom");
}

#[tokio::test]
async fn missing_binary_is_an_error() {
    let cmd = Command::new("/nonexistent/handler");
    let err = run_with_timeout(cmd, Duration::from_secs(5), "handler")
        .await
        .unwrap_err();
    assert!(err.starts_with("handler failed:"), "got: {}", err);
}

#[tokio::test]
async fn timeout_names_the_command() {
    let err = run_with_timeout(sh("sleep 10"), Duration::from_millis(100), "slow handler")
        .await
        .unwrap_err();
    assert!(err.contains("timed out"), "got: {}", err);
    assert!(err.contains("slow handler"), "got: {}", err);
}
