//! Integration tests for the command-line interface

use assert_cmd::{assert::OutputAssertExt, cargo::CommandCargoExt};
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_help_describes_the_pipeline() {
    let mut cmd = Command::cargo_bin("byline").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("planner/writer/editor pipeline"))
        .stdout(predicate::str::contains("Topic to write about"));
}

#[test]
fn test_missing_credential_exits_nonzero_before_any_request() {
    // Empty working directory: no .env to fall back to
    let tmp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("byline").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("GEMINI_API_KEY")
        .arg("--settings")
        .arg(tmp.path().join(".env"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY not found"));
}

#[test]
fn test_missing_openai_credential_names_the_right_variable() {
    let tmp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("byline").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("OPENAI_API_KEY")
        .arg("--provider")
        .arg("openai")
        .arg("--settings")
        .arg(tmp.path().join(".env"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY not found"));
}

#[test]
fn test_unknown_provider_is_rejected() {
    let tmp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("byline").unwrap();
    cmd.current_dir(tmp.path())
        .arg("--provider")
        .arg("cohere");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown completion provider"));
}
