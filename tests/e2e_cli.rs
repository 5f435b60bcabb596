//! CLI end-to-end tests

mod common;

use assert_cmd::prelude::*;
use common::TestDb;
use predicates::prelude::*;
use std::process::Command;

/// Get a command for the entrycheck binary with logging silenced
#[allow(deprecated)]
fn entrycheck_cmd() -> Command {
    let mut cmd = Command::cargo_bin("entrycheck").unwrap();
    cmd.env("RUST_LOG", "off").env_remove("ENTRYCHECK_DATABASE");
    cmd
}

/// Get a command for the entrycheck binary with the default log filter
#[allow(deprecated)]
fn entrycheck_cmd_default_logging() -> Command {
    let mut cmd = Command::cargo_bin("entrycheck").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("ENTRYCHECK_DATABASE");
    cmd
}

#[test]
fn test_cli_help_flag() {
    entrycheck_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entrycheck"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    entrycheck_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("entrycheck "));
}

#[test]
fn test_run_reports_created_and_all() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());

    entrycheck_cmd()
        .args(["--config", config.to_str().unwrap(), "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created test entry: "))
        .stdout(predicate::str::contains("\"name\":\"Test Entry\""))
        .stdout(predicate::str::contains("All test entries: ["))
        .stderr(predicate::str::is_empty());

    assert!(db.path().exists());
}

#[test]
fn test_run_is_the_default_command() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());

    entrycheck_cmd()
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created test entry: "));
}

#[test]
fn test_unreachable_store_exits_zero_with_one_error() {
    let db = TestDb::new();
    let config = db.write_config(&db.unreachable_path());

    let output = entrycheck_cmd()
        .args(["--config", config.to_str().unwrap(), "run"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<_> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    assert!(lines[0].starts_with("Error: Database error:"));
}

#[test]
fn test_unreachable_store_default_logging_reports_one_line() {
    let db = TestDb::new();
    let config = db.write_config(&db.unreachable_path());

    let output = entrycheck_cmd_default_logging()
        .args(["--config", config.to_str().unwrap(), "run"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<_> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    assert!(lines[0].starts_with("Error: Database error:"));
}

#[test]
fn test_run_default_logging_keeps_stderr_clean() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());

    entrycheck_cmd_default_logging()
        .args(["--config", config.to_str().unwrap(), "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All test entries: ["))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_blank_database_flag_rejected() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());

    entrycheck_cmd()
        .args(["--config", config.to_str().unwrap(), "--database", "   ", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database.path cannot be empty"));
}

#[test]
fn test_database_flag_overrides_config() {
    let db = TestDb::new();
    let config = db.write_config(&db.unreachable_path());
    let override_path = db.dir.path().join("override.db");

    entrycheck_cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "--database",
            override_path.to_str().unwrap(),
            "run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created test entry: "));

    assert!(override_path.exists());
}

#[test]
fn test_env_database_override() {
    let db = TestDb::new();
    let config = db.write_config(&db.unreachable_path());
    let env_path = db.dir.path().join("env.db");

    entrycheck_cmd()
        .env("ENTRYCHECK_DATABASE", &env_path)
        .args(["--config", config.to_str().unwrap(), "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created test entry: "));

    assert!(env_path.exists());
}

#[test]
fn test_list_after_run() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());
    let config = config.to_str().unwrap();

    entrycheck_cmd().args(["--config", config, "run"]).assert().success();

    let output = entrycheck_cmd()
        .args(["--config", config, "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Test Entry");
}

#[test]
fn test_list_empty_store() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());

    entrycheck_cmd()
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No test entries."));
}

#[test]
fn test_migrate_reports_version() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());

    entrycheck_cmd()
        .args(["--config", config.to_str().unwrap(), "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema version: 1 (latest 1)"))
        .stdout(predicate::str::contains("Test entries: 0"));
}

#[test]
fn test_migrate_counts_entries_after_run() {
    let db = TestDb::new();
    let config = db.write_config(&db.path());
    let config = config.to_str().unwrap();

    entrycheck_cmd().args(["--config", config, "run"]).assert().success();
    entrycheck_cmd().args(["--config", config, "run"]).assert().success();

    entrycheck_cmd()
        .args(["--config", config, "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test entries: 2"));
}

#[test]
fn test_missing_config_file_fails() {
    entrycheck_cmd()
        .args(["--config", "/nonexistent/entrycheck.toml", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
