//! The `coolcall deck` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use coolcall_core::FairnessQueue;

use crate::session::{QueueLoad, Session};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let session = Session::open(config_path, QueueLoad::Restore, &mut rand::thread_rng())?;
    print_deck(&session.queue);
    Ok(())
}

/// Print the on-deck window as a table.
pub fn print_deck(queue: &FairnessQueue) {
    if queue.is_empty() {
        println!("No students are in the on-deck rotation.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Phonetic", "Called", "Flagged"]);
    for (i, student) in queue.on_deck().iter().enumerate() {
        let student = student.borrow();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(student.display_name()),
            Cell::new(student.phonetic()),
            Cell::new(student.times_called()),
            Cell::new(student.times_flagged()),
        ]);
    }

    println!("On deck:\n{table}");
}
