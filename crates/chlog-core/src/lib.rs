//! Core library for chlog.
//!
//! This crate provides the foundational types and functionality used by the
//! `chlog` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`changelog`] - Changelog assembly and rendering
//! - [`config`] - Configuration defaults, loading, and merge policy
//! - [`error`] - Error types and result aliases
//! - [`git`] - Git operations (external collaborator)
//! - [`init`] - Starter config scaffolding
//! - [`repo`] - Repository context detection
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use chlog_core::{config, repo};
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let context = repo::locate(&cwd).expect("git not available");
//! let cfg = config::load(&context).expect("invalid configuration");
//! println!("tag filter: {}", cfg.tag_filter);
//! ```
#![deny(unsafe_code)]

pub mod changelog;

pub mod config;

pub mod error;

pub mod git;

pub mod init;

pub mod repo;

pub use config::{CONFIG_FILE_NAME, Config, UserConfig};

pub use error::{ConfigError, ConfigResult};

pub use init::{InitError, InitResult};

pub use repo::{RepoContext, RepoError, RepoResult};
