//! Changelog assembly and rendering.
//!
//! Keeps chlog thin: git owns history traversal (tag listing, commit
//! ranges); this module only decides which tags are releases, which
//! subjects survive the ignore patterns, and how the plain-text output is
//! laid out.

use camino::Utf8Path;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::git::{self, GitError};

/// Errors from the changelog pipeline.
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// A git query failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// A configured pattern does not compile.
    ///
    /// The config loader validates patterns up front, so this only fires
    /// for a [`Config`] constructed some other way.
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The regex compile error.
        source: regex::Error,
    },
}

/// One rendered section of the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    /// Tag name, or the unreleased label.
    label: String,
    /// Surviving commit subjects, newest first.
    subjects: Vec<String>,
    /// Whether to render the heading even with no subjects.
    keep_when_empty: bool,
}

/// Compiled matchers for the pattern-valued config keys.
struct Matchers {
    tag_filter: Regex,
    ignore: Vec<Regex>,
}

impl Matchers {
    fn compile(config: &Config) -> Result<Self, ChangelogError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| ChangelogError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
        };

        Ok(Self {
            tag_filter: compile(&config.tag_filter)?,
            ignore: config
                .ignore_patterns
                .iter()
                .map(|p| compile(p))
                .collect::<Result<_, _>>()?,
        })
    }

    fn is_release_tag(&self, tag: &str) -> bool {
        self.tag_filter.is_match(tag)
    }

    fn is_ignored(&self, subject: &str) -> bool {
        self.ignore.iter().any(|re| re.is_match(subject))
    }
}

/// Render the full changelog for the repository rooted at `root`.
///
/// Sections appear newest first: an unreleased section (omitted when
/// empty), then one section per release tag. A release tag always keeps its
/// heading, even when every commit in its range is ignored.
#[instrument(skip(config))]
pub fn render(root: &Utf8Path, config: &Config) -> Result<String, ChangelogError> {
    let matchers = Matchers::compile(config)?;

    let release_tags: Vec<String> = git::tags(root)?
        .into_iter()
        .filter(|tag| matchers.is_release_tag(tag))
        .collect();
    debug!(count = release_tags.len(), "release tags");

    let mut sections = Vec::with_capacity(release_tags.len() + 1);

    // Unreleased commits sit on top
    let unreleased_range = release_tags
        .last()
        .map_or_else(|| "HEAD".to_string(), |tag| format!("{tag}..HEAD"));
    sections.push(Section {
        label: config.unreleased_label.clone(),
        subjects: collect_subjects(root, &unreleased_range, &matchers)?,
        keep_when_empty: false,
    });

    // Then each release, newest first
    let mut previous: Option<&str> = None;
    let mut release_sections = Vec::with_capacity(release_tags.len());
    for tag in &release_tags {
        let range = previous.map_or_else(|| tag.clone(), |prev| format!("{prev}..{tag}"));
        release_sections.push(Section {
            label: tag.clone(),
            subjects: collect_subjects(root, &range, &matchers)?,
            keep_when_empty: true,
        });
        previous = Some(tag);
    }
    release_sections.reverse();
    sections.extend(release_sections);

    Ok(render_sections(&sections))
}

/// Collect the subjects in a range that survive the ignore patterns.
fn collect_subjects(
    root: &Utf8Path,
    range: &str,
    matchers: &Matchers,
) -> Result<Vec<String>, ChangelogError> {
    let subjects = git::subjects_in_range(root, range)?
        .into_iter()
        .map(|(_, subject)| subject)
        .filter(|subject| !matchers.is_ignored(subject))
        .collect();
    Ok(subjects)
}

fn render_sections(sections: &[Section]) -> String {
    let mut out = String::from("Changelog\n=========\n");

    for section in sections {
        if section.subjects.is_empty() && !section.keep_when_empty {
            continue;
        }
        out.push('\n');
        out.push_str(&section.label);
        out.push('\n');
        out.push_str(&"-".repeat(section.label.chars().count()));
        out.push('\n');
        for subject in &section.subjects {
            out.push_str("- ");
            out.push_str(subject);
            out.push('\n');
        }
    }

    out
}
