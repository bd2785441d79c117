//! Integration tests for `chlog init`.
//!
//! Covers the full state machine from a user's perspective: fresh repo,
//! existing file, no repo, bare repo, and invocation from a subdirectory.
//! Failure paths must leave stdout empty and write nothing to disk.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG_FILE: &str = ".chlog.toml";

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_on_fresh_repo_creates_config() {
    let tmp = TempDir::new().unwrap();
    common::init_repo(tmp.path());

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stderr(predicate::str::is_empty());

    assert!(tmp.path().join(CONFIG_FILE).is_file());
}

#[test]
fn init_twice_fails_and_preserves_the_file() {
    let tmp = TempDir::new().unwrap();
    common::init_repo(tmp.path());

    let existing = tmp.path().join(CONFIG_FILE);
    fs::write(&existing, "tag_filter = '^release-'\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "init"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("exists"));

    // Pre-existing file untouched
    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "tag_filter = '^release-'\n"
    );
}

#[test]
fn init_outside_repo_fails() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "init"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("repository"));

    assert!(!tmp.path().join(CONFIG_FILE).exists());
}

#[test]
fn init_in_bare_repo_fails() {
    let tmp = TempDir::new().unwrap();
    common::init_bare_repo(tmp.path());

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "init"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bare"));
}

#[test]
fn init_from_subdirectory_creates_config_at_root() {
    let tmp = TempDir::new().unwrap();
    common::init_repo(tmp.path());
    let sub = tmp.path().join("subdir");
    fs::create_dir(&sub).unwrap();

    cmd()
        .args(["-C", sub.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stderr(predicate::str::is_empty());

    assert!(tmp.path().join(CONFIG_FILE).is_file());
    assert!(!sub.join(CONFIG_FILE).exists());
}

#[test]
fn created_config_loads_back_as_pure_defaults() {
    let tmp = TempDir::new().unwrap();
    common::init_repo(tmp.path());
    common::commit(tmp.path(), "begin project");
    common::tag(tmp.path(), "0.1.0");

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "init"])
        .assert()
        .success();

    // A default run with the freshly scaffolded (all-commented) config
    // behaves exactly like a run without one
    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"))
        .stderr(predicate::str::is_empty());
}
