//! Error types for chlog-core

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
///
/// Absence of a config file is not an error; these only fire on a file that
/// exists but is malformed, and every variant names the file so the user
/// knows what to fix.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// Path to the offending config file.
        path: Utf8PathBuf,
        /// The underlying parse/deserialize error.
        source: Box<figment::Error>,
    },

    /// A user-supplied pattern does not compile as a regex.
    #[error("invalid pattern {pattern:?} in {path}: {source}")]
    Pattern {
        /// Path to the offending config file.
        path: Utf8PathBuf,
        /// The pattern that failed to compile.
        pattern: String,
        /// The regex compile error.
        source: regex::Error,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;
