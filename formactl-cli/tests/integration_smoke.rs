//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("formactl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cache-ttl-secs"))
        .stdout(predicate::str::contains("query-timeout-secs"));
}

#[test]
fn test_seed_help() {
    let mut cmd = Command::cargo_bin("formactl").unwrap();
    cmd.arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("database-url"))
        .stdout(predicate::str::contains("max-connections"));
}

#[test]
fn test_inspect_help() {
    let mut cmd = Command::cargo_bin("formactl").unwrap();
    cmd.arg("inspect").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Print the full payload as JSON"));
}

#[test]
fn test_inspect_without_database_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("formactl").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DATABASE_URL")
        .env("FORMACTL_CONFIG", dir.path().join("config.toml"))
        .arg("inspect");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_config_path_honors_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("formactl.toml");
    let mut cmd = Command::cargo_bin("formactl").unwrap();
    cmd.env("FORMACTL_CONFIG", &path).arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("formactl.toml"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("formactl").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("formactl"));
}
