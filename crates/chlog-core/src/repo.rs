//! Repository context detection.
//!
//! Everything chlog does starts by asking "what repository am I in?". The
//! answer is a tagged variant so callers pattern-match exhaustively instead
//! of catching exceptions: no repo at all, a bare repo (history but no
//! working tree), or a normal repo with a root and the subdirectory we were
//! invoked from.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::git::{self, GitError};

/// Errors for callers that need a normal repository.
#[derive(Error, Debug)]
pub enum RepoError {
    /// The starting directory is not inside any git repository.
    #[error("not a git repository (or any parent up to mount point)")]
    NotARepository,

    /// The enclosing repository is bare.
    #[error("cannot operate on a bare repository (no working tree)")]
    BareRepository,

    /// Repository detection failed for an unexpected reason.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// Result alias for repository detection.
pub type RepoResult<T> = Result<T, RepoError>;

/// The repository enclosing a starting directory, if any.
///
/// Computed once per invocation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoContext {
    /// No version-control root above the starting directory.
    NoRepository,
    /// A repository with history but no working tree.
    Bare,
    /// A normal repository.
    Normal {
        /// Absolute path of the working tree root.
        root: Utf8PathBuf,
        /// Path from the root to the starting directory (empty at the root).
        subpath: Utf8PathBuf,
    },
}

impl RepoContext {
    /// The working tree root, when this is a normal repository.
    pub fn root(&self) -> Option<&Utf8Path> {
        match self {
            Self::Normal { root, .. } => Some(root),
            _ => None,
        }
    }

    /// Require a normal repository, yielding its root and subpath.
    ///
    /// The other two contexts become the matching [`RepoError`], so command
    /// flows that cannot proceed without a working tree fail with the
    /// canonical message.
    pub fn into_normal(self) -> RepoResult<(Utf8PathBuf, Utf8PathBuf)> {
        match self {
            Self::NoRepository => Err(RepoError::NotARepository),
            Self::Bare => Err(RepoError::BareRepository),
            Self::Normal { root, subpath } => Ok((root, subpath)),
        }
    }
}

/// Locate the repository enclosing `start_dir`.
///
/// Delegates the upward directory walk to git itself, so the result is
/// identical whether invoked from the root or from an arbitrary
/// subdirectory. No side effects.
///
/// Only unexpected git failures (git missing from PATH, I/O errors) are
/// returned as `Err`; "there is no repository here" is a successful
/// [`RepoContext::NoRepository`] answer.
#[instrument]
pub fn locate(start_dir: &Utf8Path) -> RepoResult<RepoContext> {
    let bare = match git::is_bare_repository(start_dir) {
        Err(GitError::NotARepo) => {
            debug!("no enclosing repository");
            return Ok(RepoContext::NoRepository);
        }
        other => other?,
    };

    if bare {
        debug!("enclosing repository is bare");
        return Ok(RepoContext::Bare);
    }

    let root = Utf8PathBuf::from(git::toplevel(start_dir)?);
    let subpath = Utf8PathBuf::from(git::prefix(start_dir)?);
    debug!(%root, %subpath, "normal repository");
    Ok(RepoContext::Normal { root, subpath })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{init_bare_repo, init_repo};
    use camino::Utf8PathBuf;

    #[test]
    fn locate_outside_any_repo() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let context = locate(&dir).unwrap();
        assert_eq!(context, RepoContext::NoRepository);
        drop(tmp);
    }

    #[test]
    fn locate_bare_repo() {
        let (tmp, dir) = init_bare_repo();
        let context = locate(&dir).unwrap();
        assert_eq!(context, RepoContext::Bare);
        drop(tmp);
    }

    #[test]
    fn locate_normal_repo_at_root() {
        let (tmp, dir) = init_repo();
        let context = locate(&dir).unwrap();
        match context {
            RepoContext::Normal { subpath, .. } => assert_eq!(subpath, ""),
            other => panic!("expected normal repo, got {other:?}"),
        }
        drop(tmp);
    }

    #[test]
    fn locate_normal_repo_from_subdirectory() {
        let (tmp, dir) = init_repo();
        let sub = dir.join("src").join("deep");
        std::fs::create_dir_all(&sub).unwrap();

        let context = locate(&sub).unwrap();
        match context {
            RepoContext::Normal { root, subpath } => {
                assert_eq!(subpath, "src/deep");
                // Canonicalize: macOS tempdirs live behind /private
                assert_eq!(
                    std::fs::canonicalize(&root).unwrap(),
                    std::fs::canonicalize(&dir).unwrap()
                );
            }
            other => panic!("expected normal repo, got {other:?}"),
        }
        drop(tmp);
    }

    #[test]
    fn into_normal_maps_contexts_to_errors() {
        let err = RepoContext::NoRepository.into_normal().unwrap_err();
        assert!(matches!(err, RepoError::NotARepository));
        assert!(err.to_string().contains("repository"));

        let err = RepoContext::Bare.into_normal().unwrap_err();
        assert!(matches!(err, RepoError::BareRepository));
        assert!(err.to_string().contains("bare"));

        let normal = RepoContext::Normal {
            root: Utf8PathBuf::from("/repo"),
            subpath: Utf8PathBuf::from("src"),
        };
        let (root, subpath) = normal.into_normal().unwrap();
        assert_eq!(root, "/repo");
        assert_eq!(subpath, "src");
    }

    #[test]
    fn root_accessor_only_on_normal() {
        assert!(RepoContext::NoRepository.root().is_none());
        assert!(RepoContext::Bare.root().is_none());
        let normal = RepoContext::Normal {
            root: Utf8PathBuf::from("/repo"),
            subpath: Utf8PathBuf::new(),
        };
        assert_eq!(normal.root().map(Utf8Path::as_str), Some("/repo"));
    }
}
