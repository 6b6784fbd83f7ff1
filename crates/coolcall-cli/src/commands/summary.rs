//! The `coolcall summary` command.

use std::path::PathBuf;

use anyhow::Result;

use coolcall_report::generate_summary;

use crate::session::{QueueLoad, Session};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let session = Session::open(config_path, QueueLoad::Restore, &mut rand::thread_rng())?;
    print!("{}", generate_summary(session.roster.students()));
    Ok(())
}
