//! Init command — scaffold a starter config file.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

/// Arguments for the `init` subcommand.
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    // No subcommand-specific arguments
}

/// Create a starter `.chlog.toml` at the repository root.
///
/// Success prints a confirmation to stdout; every failure path leaves
/// stdout untouched and surfaces the error for `main` to report on stderr.
#[instrument(name = "cmd_init", skip_all)]
pub fn cmd_init(_args: InitArgs, cwd: &camino::Utf8Path) -> anyhow::Result<()> {
    debug!(%cwd, "executing init command");

    let created = chlog_core::init::init(cwd)?;
    println!("{} {} created", "✓".green(), created.cyan());
    Ok(())
}
