//! Help and version output specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: resq")
        .stdout_has("work")
        .stdout_has("enqueue");
}

#[test]
fn help_lists_every_command() {
    let out = cli().args(&["--help"]).passes();
    for command in [
        "work", "enqueue", "queues", "workers", "prune", "pause", "resume", "stats", "failed",
    ] {
        assert!(out.stdout.contains(command), "missing {command}:\n{}", out.stdout);
    }
}

#[test]
fn version_prints_package_version() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_eq(&format!("resq {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn work_help_documents_flags() {
    cli()
        .args(&["work", "--help"])
        .passes()
        .stdout_has("--queue")
        .stdout_has("--interval")
        .stdout_has("--blocking")
        .stdout_has("--handlers");
}
