//! CLI error handling specs
//!
//! Argument and configuration problems are reported before any store
//! connection is attempted; store problems exit with code 1.

use crate::prelude::*;

#[test]
fn enqueue_rejects_invalid_args_json() {
    cli()
        .args(&["enqueue", "mail", "Mailer", "{oops"])
        .fails()
        .exit_code(1)
        .stderr_has("ARGS_JSON is not valid JSON");
}

#[test]
fn enqueue_rejects_wildcard_queue() {
    cli()
        .args(&["enqueue", "*", "Mailer"])
        .fails()
        .stderr_has("invalid queue name '*'");
}

#[test]
fn work_without_handlers_fails() {
    cli()
        .args(&["work", "--interval", "0"])
        .fails()
        .stderr_has("pass --handlers or set RESQ_HANDLERS");
}

#[test]
fn work_with_missing_handler_file_fails() {
    cli()
        .args(&["work", "--handlers", "/nonexistent/handlers.toml"])
        .fails()
        .stderr_has("failed to read handler file");
}

#[test]
fn work_with_invalid_handler_file_fails() {
    let file = HandlerFile::new("[handlers]\nMailer = 42\n");
    cli()
        .args(&["work", "--handlers", file.path()])
        .fails()
        .stderr_has("invalid handler file");
}

#[test]
fn work_with_valid_handlers_reports_unreachable_store() {
    let file = HandlerFile::new("[handlers]\nMailer = \"true\"\n");
    cli()
        .args(&["work", "--interval", "0", "--handlers", file.path()])
        .fails()
        .exit_code(1)
        .stderr_has("failed to connect to redis://127.0.0.1:1");
}

#[test]
fn pause_rejects_malformed_identity() {
    cli()
        .args(&["pause", "not-an-identity"])
        .fails()
        .stderr_has("expected host:pid:queues");
}

#[test]
fn queues_reports_unreachable_store() {
    cli()
        .args(&["queues"])
        .fails()
        .stderr_has("failed to connect to redis://127.0.0.1:1");
}

#[test]
fn unknown_output_format_is_rejected() {
    cli()
        .args(&["-o", "yaml", "queues"])
        .fails()
        .exit_code(2)
        .stderr_has("invalid value 'yaml'");
}

#[test]
fn unknown_subcommand_is_rejected() {
    cli()
        .args(&["frobnicate"])
        .fails()
        .exit_code(2)
        .stderr_has("unrecognized subcommand");
}
