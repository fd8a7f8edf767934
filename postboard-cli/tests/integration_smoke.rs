//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn postboard() -> Command {
    let mut cmd = Command::cargo_bin("postboard").unwrap();
    // keep the user's real config and .env out of the tests
    cmd.env_remove("DATABASE_URL")
        .env_remove("POSTBOARD_BIND")
        .env_remove("POSTBOARD_CONFIG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    postboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    postboard()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    postboard()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config written"));

    postboard()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[database]"))
        .stdout(predicate::str::contains("sqlite://postboard.db"));

    // second init without --force refuses
    postboard()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_path_honours_flag() {
    postboard()
        .args(["--config", "/tmp/somewhere/config.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/somewhere/config.toml"));
}

#[test]
fn test_migrate_creates_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("blog.db");

    postboard()
        .current_dir(dir.path())
        .arg("migrate")
        .arg("--database-url")
        .arg(format!("sqlite://{}", db.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));

    assert!(db.exists());
}
