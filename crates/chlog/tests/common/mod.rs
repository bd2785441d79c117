//! Shared git fixtures for the CLI integration tests.
//!
//! Each test binary links this module independently and uses a subset of
//! the helpers.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic fake clock so commit/tag creation order is unambiguous even
/// when several land within the same wall-clock second.
static TICK: AtomicU64 = AtomicU64::new(1_700_000_000);

fn next_date() -> String {
    let t = TICK.fetch_add(60, Ordering::SeqCst);
    format!("{t} +0000")
}

/// Run a git command in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let date = next_date();
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .env("GIT_AUTHOR_NAME", "test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .status()
        .expect("failed to spawn git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// Turn `dir` into an empty normal repository.
pub fn init_repo(dir: &Path) {
    git(dir, &["init", "--quiet", "--initial-branch=main"]);
}

/// Turn `dir` into a bare repository.
pub fn init_bare_repo(dir: &Path) {
    git(dir, &["init", "--quiet", "--bare"]);
}

/// Record an empty commit with the given subject.
pub fn commit(dir: &Path, subject: &str) {
    git(dir, &["commit", "--quiet", "--allow-empty", "-m", subject]);
}

/// Create a lightweight tag at HEAD.
pub fn tag(dir: &Path, name: &str) {
    git(dir, &["tag", name]);
}
