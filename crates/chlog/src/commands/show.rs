//! Default command — render the changelog to stdout.

use tracing::{debug, instrument};

use chlog_core::{changelog, config, repo};

/// Run the full pipeline: locate repository, resolve configuration, render.
///
/// This is the no-subcommand behavior. Nothing is printed until the whole
/// changelog has been assembled, so a failure anywhere produces no partial
/// output.
#[instrument(name = "cmd_show", skip_all)]
pub fn cmd_show(cwd: &camino::Utf8Path) -> anyhow::Result<()> {
    debug!(%cwd, "executing show command");

    let (root, subpath) = repo::locate(cwd)?.into_normal()?;
    debug!(%root, %subpath, "repository located");

    let config = config::load_from_root(&root)?;
    let output = changelog::render(&root, &config)?;

    print!("{output}");
    Ok(())
}
