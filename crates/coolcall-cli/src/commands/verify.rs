//! The `coolcall verify` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use coolcall_report::{run_verification, write_verification};

use crate::session::{QueueLoad, Session};

pub fn execute(config_path: Option<PathBuf>, restarts: usize, calls: usize) -> Result<()> {
    anyhow::ensure!(restarts >= 1, "restarts must be at least 1");
    anyhow::ensure!(calls >= 1, "calls must be at least 1");

    let mut rng = rand::thread_rng();
    let session = Session::open(config_path, QueueLoad::Restore, &mut rng)?;

    eprintln!("Running {restarts} restarts x {calls} cold calls...");
    let run = run_verification(&session.queue, &session.roster, restarts, calls, &mut rng)?;
    let (calls_path, summary_path) = write_verification(
        &run,
        &session.config.log_dir,
        chrono::Local::now().date_naive(),
    )?;

    let mut table = Table::new();
    table.set_header(vec!["Student", "Times called", "Share"]);
    let total = run.total_calls().max(1) as f64;
    for (key, count) in &run.tally {
        table.add_row(vec![
            Cell::new(format!("{} {}", key.first_name, key.last_name)),
            Cell::new(count),
            Cell::new(format!("{:.1}%", *count as f64 / total * 100.0)),
        ]);
    }
    println!("{table}");

    if let Some((min, max)) = run.spread() {
        println!("Spread among students in the rotation: {min}..{max}");
    }
    println!("Calls written to {}", calls_path.display());
    println!("Summary written to {}", summary_path.display());
    Ok(())
}
