// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use resq_core::test_support::job;
use resq_core::Payload;
use std::io::Write;

#[test]
fn parses_string_and_table_handlers() {
    let performer = CommandPerformer::from_toml(
        r#"
timeout_secs = 30

[handlers]
Mail = "true"
Report = { run = "true", timeout_secs = 5 }
"#,
    )
    .unwrap();
    assert_eq!(performer.len(), 2);
    assert_eq!(performer.timeout_for("Mail"), Some(Duration::from_secs(30)));
    assert_eq!(performer.timeout_for("Report"), Some(Duration::from_secs(5)));
    assert_eq!(performer.timeout_for("Other"), None);
}

#[test]
fn default_timeout_without_override() {
    let performer = CommandPerformer::from_toml("[handlers]\nMail = \"true\"\n").unwrap();
    assert_eq!(performer.timeout_for("Mail"), Some(JOB_COMMAND_TIMEOUT));
}

#[test]
fn empty_file_has_no_handlers() {
    assert!(CommandPerformer::from_toml("").unwrap().is_empty());
}

#[test]
fn rejects_empty_command() {
    assert!(matches!(
        CommandPerformer::from_toml("[handlers]\nMail = \"  \"\n"),
        Err(PerformerConfigError::EmptyCommand(class)) if class == "Mail"
    ));
}

#[test]
fn rejects_unknown_top_level_keys() {
    assert!(matches!(
        CommandPerformer::from_toml("retries = 3\n"),
        Err(PerformerConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_file_and_reports_missing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[handlers]\nMail = \"true\"").unwrap();
    assert_eq!(CommandPerformer::load(file.path()).unwrap().len(), 1);

    let err = CommandPerformer::load(Path::new("/nonexistent/handlers.toml")).unwrap_err();
    assert!(matches!(err, PerformerConfigError::Read { .. }));
}

#[tokio::test]
async fn unknown_class_is_handler_not_found() {
    let performer = CommandPerformer::default();
    let err = performer.perform(&job("q", "Mail", "1")).await.unwrap_err();
    assert_eq!(err, JobError::HandlerNotFound("Mail".to_string()));
}

#[cfg(unix)]
#[tokio::test]
async fn successful_command_passes_job_environment() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("env.txt");
    let toml = format!(
        "[handlers]\nMail = 'echo \"$RESQ_JOB_ID $RESQ_QUEUE $RESQ_CLASS $RESQ_ARGS\" > {}'\n",
        out.display()
    );
    let performer = CommandPerformer::from_toml(&toml).unwrap();
    let job = Job::new(
        "mail",
        Payload::new("Mail")
            .with_args(serde_json::json!({"to": "a@b"}))
            .with_id("j1"),
    );

    performer.perform(&job).await.unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.trim(), r#"j1 mail Mail [{"to":"a@b"}]"#);
}

#[cfg(unix)]
#[tokio::test]
async fn failing_command_carries_stderr() {
    let performer =
        CommandPerformer::from_toml("[handlers]\nMail = 'echo no smtp >&2; exit 3'\n").unwrap();
    let err = performer.perform(&job("mail", "Mail", "1")).await.unwrap_err();
    assert_eq!(
        err,
        JobError::Failed("handler for Mail failed with exit code 3: no smtp".to_string())
    );
}

#[cfg(unix)]
#[tokio::test]
async fn slow_command_times_out() {
    let performer = CommandPerformer::from_toml(
        "[handlers]\nSlow = { run = 'sleep 5', timeout_secs = 0 }\n",
    )
    .unwrap();
    let err = performer.perform(&job("q", "Slow", "1")).await.unwrap_err();
    assert!(err.to_string().contains("timed out"), "{err}");
}
