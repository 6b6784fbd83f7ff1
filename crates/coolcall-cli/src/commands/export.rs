//! The `coolcall export` command.

use std::path::PathBuf;

use anyhow::Result;

use coolcall_core::load_config_from;

use crate::session::load_roster;

pub fn execute(config_path: Option<PathBuf>, dir: PathBuf) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let roster = load_roster(&config)?;

    anyhow::ensure!(dir.is_dir(), "not a directory: {}", dir.display());
    let path = roster.export(&dir)?;
    println!("Roster exported to {}", path.display());
    Ok(())
}
