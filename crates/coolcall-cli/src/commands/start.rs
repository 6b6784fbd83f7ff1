//! The `coolcall start` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::commands::deck::print_deck;
use crate::session::{QueueLoad, Session};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let session = Session::open(config_path, QueueLoad::Restart, &mut rand::thread_rng())?;
    println!(
        "Session started: {} students in the rotation.",
        session.queue.len()
    );
    print_deck(&session.queue);
    Ok(())
}
