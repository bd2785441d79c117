//! Git operations for changelog generation.
//!
//! Shells out to `git` for all operations. This ensures we inherit the user's
//! refspec handling, worktree layout, and other configuration instead of
//! reimplementing repository plumbing.

use std::process::Command;

use camino::Utf8Path;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    /// Failed to execute the `git` command.
    #[error("failed to run git: {0}")]
    Exec(#[from] std::io::Error),

    /// `git` returned a non-zero exit code.
    #[error("git {command} failed: {stderr}")]
    Command {
        /// The git subcommand that failed (e.g., "log").
        command: String,
        /// Captured stderr.
        stderr: String,
    },

    /// Not inside a git repository.
    #[error("not a git repository (or any parent up to mount point)")]
    NotARepo,
}

/// Result alias for git operations.
pub type GitResult<T> = Result<T, GitError>;

/// Check whether `dir` is inside a bare repository.
///
/// Fails with [`GitError::NotARepo`] when `dir` is not inside any
/// repository at all.
#[instrument]
pub fn is_bare_repository(dir: &Utf8Path) -> GitResult<bool> {
    let output = git(dir, &["rev-parse", "--is-bare-repository"])?;
    let bare = output.trim() == "true";
    debug!(bare, "bare repository check");
    Ok(bare)
}

/// Get the absolute path of the working tree root enclosing `dir`.
#[instrument]
pub fn toplevel(dir: &Utf8Path) -> GitResult<String> {
    let output = git(dir, &["rev-parse", "--show-toplevel"])?;
    let root = output.trim().to_string();
    debug!(%root, "working tree root");
    Ok(root)
}

/// Get the path of `dir` relative to the working tree root.
///
/// Empty when `dir` is the root itself. Git reports the prefix with a
/// trailing slash, which is stripped here.
#[instrument]
pub fn prefix(dir: &Utf8Path) -> GitResult<String> {
    let output = git(dir, &["rev-parse", "--show-prefix"])?;
    let subpath = output.trim().trim_end_matches('/').to_string();
    debug!(%subpath, "subdirectory prefix");
    Ok(subpath)
}

/// List all tags in the repository containing `dir`, oldest first.
#[instrument]
pub fn tags(dir: &Utf8Path) -> GitResult<Vec<String>> {
    let output = git(dir, &["tag", "--list", "--sort=creatordate"])?;
    let tags: Vec<String> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect();
    debug!(count = tags.len(), "listed tags");
    Ok(tags)
}

/// Get the commit subjects in a revision range, newest first.
///
/// Returns a list of `(short_hash, subject)` tuples. The range is anything
/// `git log` accepts (`"HEAD"`, `"v1.0..v1.1"`, ...).
#[instrument]
pub fn subjects_in_range(dir: &Utf8Path, range: &str) -> GitResult<Vec<(String, String)>> {
    let output = git(dir, &["log", range, "--format=%h%x09%s"])?;

    let commits: Vec<(String, String)> = output
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (hash, subject) = line.split_once('\t').unwrap_or((line, ""));
            (hash.to_string(), subject.to_string())
        })
        .collect();

    debug!(range, count = commits.len(), "commits in range");
    Ok(commits)
}

/// Run a git command in `dir` and return its stdout.
fn git(dir: &Utf8Path, args: &[&str]) -> GitResult<String> {
    let output = Command::new("git").arg("-C").arg(dir).args(args).output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // Detect "not a git repo" specifically
        if stderr.contains("not a git repository") {
            return Err(GitError::NotARepo);
        }

        Err(GitError::Command {
            command: args.first().unwrap_or(&"").to_string(),
            stderr,
        })
    }
}
