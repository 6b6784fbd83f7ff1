//! The `coolcall import` command.

use std::path::PathBuf;

use anyhow::Result;

use coolcall_core::{changed_names, load_config_from, FairnessQueue, Roster};

use crate::commands::deck::print_deck;
use crate::session::{load_roster, warn_persist};

pub fn execute(config_path: Option<PathBuf>, roster_path: PathBuf, yes: bool) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let new_roster = Roster::import(&roster_path, &config.roster_settings())?;

    let (current, initial_import) = if config.roster_path().exists() {
        match load_roster(&config) {
            Ok(roster) => (roster, false),
            Err(e) => {
                tracing::warn!("{e:#}; comparing against an empty roster");
                (Roster::new(), true)
            }
        }
    } else {
        (Roster::new(), true)
    };

    let diff = new_roster.compare(&current);
    let names = changed_names(&diff).join(", ");
    if initial_import {
        println!("This roster contains the following students: {names}.");
    } else if diff.is_empty() {
        println!("No student data will be changed by this import.");
    } else {
        println!("Importing this roster changes the stored data of {names}.");
    }

    if !yes {
        println!("Nothing imported. Re-run with --yes to proceed.");
        return Ok(());
    }

    new_roster.persist(&config.roster_path())?;
    println!(
        "Imported {} students from {}",
        new_roster.len(),
        roster_path.display()
    );

    let mut queue = FairnessQueue::new(config.queue_settings(), Some(config.queue_path()));
    if let Err(e) = queue.seed_from_roster(&new_roster, &mut rand::thread_rng()) {
        warn_persist(&e);
    }
    print_deck(&queue);
    Ok(())
}
