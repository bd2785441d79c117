//! Configuration resolution.
//!
//! chlog reads exactly one optional config file: `.chlog.toml` at the
//! repository root. The file is a declarative set of key/value overrides
//! merged onto the built-in defaults with a per-key policy:
//!
//! - `tag_filter` — **replace**: the user's regex supersedes the default.
//! - `ignore_patterns` — **additive**: user patterns are appended after the
//!   default list, order preserved, duplicates allowed.
//! - `unreleased_label` — **replace**.
//!
//! Additive semantics are an explicit per-key declaration, not inferred
//! from a value being a list. Unset keys keep the default value, so the
//! resolved [`Config`] always has a defined value for every key.
//!
//! Absence of the file is not an error; malformed content is fatal and the
//! error message identifies the file.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Toml};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{ConfigError, ConfigResult};
use crate::repo::RepoContext;

/// Conventional config file name, always at the repository root.
pub const CONFIG_FILE_NAME: &str = ".chlog.toml";

/// Default regex selecting which tags are release markers.
pub const DEFAULT_TAG_FILTER: &str = r"^v?[0-9]+\.[0-9]+(\.[0-9]+)?$";

/// Default commit-subject patterns excluded from the changelog.
///
/// Markers like `!minor` follow the convention of annotating a commit
/// subject to keep it out of release notes.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "@minor",
    "!minor",
    "@cosmetic",
    "!cosmetic",
    "@refactor",
    "!refactor",
    "@wip",
    "!wip",
    "^$",
];

/// Default heading for commits after the most recent release tag.
pub const DEFAULT_UNRELEASED_LABEL: &str = "Unreleased";

/// The resolved configuration.
///
/// Every field always has a value: [`Config::default`] is the full built-in
/// baseline and merging only ever layers user values on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Regex selecting which tags are treated as release markers.
    pub tag_filter: String,
    /// Regexes excluding matching commit subjects from the changelog.
    pub ignore_patterns: Vec<String>,
    /// Heading for the section of commits after the last release tag.
    pub unreleased_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_filter: DEFAULT_TAG_FILTER.to_string(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            unreleased_label: DEFAULT_UNRELEASED_LABEL.to_string(),
        }
    }
}

/// A partial configuration as read from `.chlog.toml`.
///
/// Every field is optional; only the keys the user mentions participate in
/// the merge. Unknown keys are ignored, matching the tolerance a future
/// chlog with more options needs from an older one.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    /// Replaces the default tag filter.
    pub tag_filter: Option<String>,
    /// Appended after the default ignore patterns (additive key).
    pub ignore_patterns: Option<Vec<String>>,
    /// Replaces the default unreleased heading.
    pub unreleased_label: Option<String>,
}

impl UserConfig {
    /// Merge this override onto `base` per the per-key policy.
    ///
    /// Produces a new value; `base` (usually the process-wide defaults) is
    /// consumed, never mutated in place behind the caller's back.
    pub fn merge_onto(self, mut base: Config) -> Config {
        if let Some(tag_filter) = self.tag_filter {
            base.tag_filter = tag_filter;
        }
        // ignore_patterns is the one additive key: extend, don't replace
        if let Some(extra) = self.ignore_patterns {
            base.ignore_patterns.extend(extra);
        }
        if let Some(label) = self.unreleased_label {
            base.unreleased_label = label;
        }
        base
    }
}

/// The expected config file path for a repository root.
pub fn config_file_path(root: &Utf8Path) -> Utf8PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the configuration for a located repository.
///
/// Outside a normal repository there is no root to read from, so the
/// defaults are returned unchanged (the init and error flows short-circuit
/// before configuration matters).
#[instrument]
pub fn load(repo: &RepoContext) -> ConfigResult<Config> {
    match repo.root() {
        Some(root) => load_from_root(root),
        None => Ok(Config::default()),
    }
}

/// Load the configuration given a repository root directory.
///
/// A missing `.chlog.toml` yields the defaults; a present but malformed one
/// is a [`ConfigError`] naming the file.
#[instrument]
pub fn load_from_root(root: &Utf8Path) -> ConfigResult<Config> {
    let path = config_file_path(root);
    if !path.is_file() {
        debug!(%path, "no config file, using defaults");
        return Ok(Config::default());
    }

    let user: UserConfig = Figment::new()
        .merge(Toml::file_exact(path.as_str()))
        .extract()
        .map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: Box::new(e),
        })?;
    debug!(%path, ?user, "config file loaded");

    let config = user.merge_onto(Config::default());
    validate_patterns(&config, &path)?;
    Ok(config)
}

/// Check that every pattern in a resolved config compiles.
///
/// Only reachable when a user file was read: the built-in defaults compile
/// by construction, so any failure here names a user-supplied pattern.
fn validate_patterns(config: &Config, path: &Utf8Path) -> ConfigResult<()> {
    let mut patterns = vec![config.tag_filter.as_str()];
    patterns.extend(config.ignore_patterns.iter().map(String::as_str));

    for pattern in patterns {
        if let Err(source) = Regex::new(pattern) {
            return Err(ConfigError::Pattern {
                path: path.to_path_buf(),
                pattern: pattern.to_string(),
                source,
            });
        }
    }
    Ok(())
}
