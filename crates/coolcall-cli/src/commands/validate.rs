//! The `coolcall validate` command.

use std::path::PathBuf;

use anyhow::Result;

use coolcall_core::{load_config_from, Roster};

pub fn execute(config_path: Option<PathBuf>, roster_path: PathBuf) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let roster = Roster::import(&roster_path, &config.roster_settings())?;

    println!(
        "Roster valid: {} students ({} in the on-deck rotation)",
        roster.len(),
        roster.eligible().len()
    );
    Ok(())
}
