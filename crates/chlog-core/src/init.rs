//! Scaffolding for the `init` subcommand.
//!
//! Creates a starter `.chlog.toml` at the repository root with the built-in
//! defaults written out commented, so the file documents itself and changes
//! nothing until the user uncomments a line.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{
    DEFAULT_IGNORE_PATTERNS, DEFAULT_TAG_FILTER, DEFAULT_UNRELEASED_LABEL, config_file_path,
};
use crate::repo::{self, RepoError};

/// Errors from scaffolding a configuration file.
#[derive(Error, Debug)]
pub enum InitError {
    /// The starting directory has no usable repository (absent or bare).
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// A config file is already present at the repository root.
    #[error("configuration file already exists at {0}")]
    FileExists(Utf8PathBuf),

    /// Writing the starter file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The intended config file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result alias for init operations.
pub type InitResult<T> = Result<T, InitError>;

/// Scaffold a starter config file for the repository enclosing `start_dir`.
///
/// The file always lands at the repository root, even when invoked from a
/// subdirectory. Refuses to overwrite an existing file. On success returns
/// the created path; on every failure path nothing has been written.
#[instrument]
pub fn init(start_dir: &Utf8Path) -> InitResult<Utf8PathBuf> {
    let (root, _subpath) = repo::locate(start_dir)?.into_normal()?;

    let target = config_file_path(&root);
    if target.exists() {
        return Err(InitError::FileExists(target));
    }

    write_starter(&target)?;
    debug!(path = %target, "starter config created");
    Ok(target)
}

/// Write the starter file via a sibling temp file renamed into place, so a
/// failed write can never leave a partial file at the target path.
fn write_starter(target: &Utf8Path) -> InitResult<()> {
    let io_err = |source| InitError::Write {
        path: target.to_path_buf(),
        source,
    };

    let dir = target.parent().unwrap_or(Utf8Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".chlog-init")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(starter_config().as_bytes()).map_err(io_err)?;
    // noclobber: the pre-flight existence check is not atomic
    tmp.persist_noclobber(target)
        .map_err(|e| io_err(e.error))?;
    Ok(())
}

/// Render the starter config: documented defaults, all commented out.
fn starter_config() -> String {
    let ignore_list = DEFAULT_IGNORE_PATTERNS
        .iter()
        .map(|p| format!("{p:?}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"# chlog configuration.
#
# Every key is optional; an unset key keeps the built-in default shown
# below. Values are merged onto the defaults per key.

# Regex selecting which tags are treated as release markers (replaces the
# default when set).
#tag_filter = '{DEFAULT_TAG_FILTER}'

# Commit subjects matching any of these regexes are left out of the
# changelog. Patterns listed here are ADDED after the built-in defaults,
# they do not replace them.
#ignore_patterns = [{ignore_list}]

# Heading for commits after the most recent release tag.
#unreleased_label = "{DEFAULT_UNRELEASED_LABEL}"
"#
    )
}
