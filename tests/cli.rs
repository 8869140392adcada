//! Integration tests for the `kt` binary.
//!
//! These tests exercise the full CLI: argument parsing, config loading,
//! batch processing, and output formatting.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for running kt with no ambient config.
fn kt() -> Command {
    let mut cmd = Command::cargo_bin("kt").unwrap();
    cmd.env_remove("KEYTALLY_CONFIG")
        .env_remove("KEYTALLY_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent-keytally-test")
        .env("HOME", "/nonexistent-keytally-test");
    cmd
}

#[test]
fn version_flag_works() {
    kt().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kt"));
}

#[test]
fn help_flag_works() {
    kt().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "keytally - accumulate key=value batches",
        ));
}

#[test]
fn eval_prints_sorted_store() {
    kt().args(["eval", "one=1", "Three=four, one=5"])
        .assert()
        .success()
        .stdout("one=6\nThree=four\n");
}

#[test]
fn eval_undo() {
    kt().args(["eval", "one=1", "Three=four, one=5", "--undo", "1"])
        .assert()
        .success()
        .stdout("one=1\n");
}

#[test]
fn eval_reports_errors_on_stderr() {
    kt().args(["eval", "abc,441=1,a=1"])
        .assert()
        .success()
        .stdout("a=1\n")
        .stderr(predicate::str::contains("error: Invalid format."))
        .stderr(predicate::str::contains(
            "error: atomic group(441,442,500) missing 442,500",
        ));
}

#[test]
fn eval_reports_overflow_cause() {
    kt().args(["eval", "A=0,A=21474836470"])
        .assert()
        .success()
        .stdout("A=0\n")
        .stderr(predicate::str::contains("The integer value overflows."))
        .stderr(predicate::str::contains("caused by: operand out of 32-bit"));
}

#[test]
fn eval_json() {
    let output = kt()
        .args(["eval", "b=2,a=1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["history_depth"], 1);
    assert_eq!(json["entries"][0]["key"], "a");
    assert_eq!(json["entries"][1]["value"], "2");
}

#[test]
fn history_capacity_flag_limits_undo() {
    kt().args(["--history-capacity", "1", "eval", "a=1", "a=1", "a=1", "--undo", "3"])
        .assert()
        .success()
        .stdout("a=2\n");
}

#[test]
fn config_file_sets_capacity() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "history_capacity = 2\n").unwrap();

    kt().arg("--config")
        .arg(&path)
        .args(["eval", "a=1", "a=1", "a=1", "a=1", "--undo", "9"])
        .assert()
        .success()
        .stdout("a=2\n");
}

#[test]
fn config_from_env_var() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "history_capacity = 7\n").unwrap();

    kt().env("KEYTALLY_CONFIG", &path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("history_capacity = 7"));
}

#[test]
fn invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "history_capacity = 0\n").unwrap();

    kt().arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("history_capacity must be at least 1"));
}

#[test]
fn missing_explicit_config_fails() {
    kt().args(["--config", "/nonexistent-keytally-test/config.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn config_shows_defaults() {
    kt().arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("history_capacity = 256"));
}

#[test]
fn repl_reads_stdin() {
    kt().arg("repl")
        .write_stdin("one=1\nThree=four, one=5\ndisplay\nundo\ndisplay\nquit\n")
        .assert()
        .success()
        .stdout("one=6\nThree=four\none=1\n");
}

#[test]
fn completion_generates_script() {
    kt().args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kt"));
}
