//! Random distribution verification.
//!
//! Replays the fairness queue many times, simulating application restarts
//! and cold calls, and tallies how often each student was chosen. Runs on a
//! detached copy of the queue, so the real queue and its snapshot are never
//! touched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::Rng;

use coolcall_core::{FairnessQueue, Roster, StudentKey};

pub const DEFAULT_RESTARTS: usize = 100;
pub const DEFAULT_CALLS_PER_RESTART: usize = 100;

pub const CALLS_FILE: &str = "random_distribution_verification.txt";
pub const SUMMARY_FILE: &str = "RDV_summary.txt";

/// Outcome of a verification run.
#[derive(Debug, Clone)]
pub struct VerificationRun {
    /// Display name of every student called, in call order.
    pub calls: Vec<String>,
    /// Times each roster student was called, including those never called.
    pub tally: BTreeMap<StudentKey, u32>,
}

impl VerificationRun {
    pub fn total_calls(&self) -> usize {
        self.calls.len()
    }

    /// Smallest and largest per-student count among students that were
    /// eligible to be called.
    pub fn spread(&self) -> Option<(u32, u32)> {
        let counts = self
            .tally
            .iter()
            .filter(|(key, _)| key.reveal_code == coolcall_core::student::REVEAL_INCLUDE)
            .map(|(_, count)| *count);
        let min = counts.clone().min()?;
        let max = counts.max()?;
        Some((min, max))
    }
}

/// Simulate `restarts` restarts of `calls_per_restart` random calls each.
///
/// Each restart shuffles the front and back of the queue; each call picks
/// a uniformly random on-deck student and takes them off deck.
pub fn run_verification<R: Rng + ?Sized>(
    queue: &FairnessQueue,
    roster: &Roster,
    restarts: usize,
    calls_per_restart: usize,
    rng: &mut R,
) -> Result<VerificationRun> {
    anyhow::ensure!(
        !queue.is_empty(),
        "no students are eligible for the on-deck rotation"
    );

    let mut test_queue = queue.detached();
    let insert_delay = test_queue.settings().insert_delay;
    let mut tally: BTreeMap<StudentKey, u32> = roster
        .students()
        .map(|s| (s.borrow().key(), 0))
        .collect();
    let mut calls = Vec::with_capacity(restarts * calls_per_restart);

    for _ in 0..restarts {
        test_queue.shuffle_front_and_back(insert_delay, rng);
        for _ in 0..calls_per_restart {
            let deck = test_queue.on_deck();
            let student = deck[rng.gen_range(0..deck.len())].clone();
            let (key, name) = {
                let record = student.borrow();
                (record.key(), record.display_name())
            };
            test_queue.take_off_deck(&key, rng)?;
            *tally.entry(key).or_default() += 1;
            calls.push(name);
        }
    }

    tracing::info!(
        "verification: {} restarts x {} calls over {} students",
        restarts,
        calls_per_restart,
        test_queue.len()
    );
    Ok(VerificationRun { calls, tally })
}

/// Write the call list and the per-student summary into `dir`, overwriting
/// earlier runs. Returns `(calls_path, summary_path)`.
pub fn write_verification(
    run: &VerificationRun,
    dir: &Path,
    date: NaiveDate,
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let mut calls = String::from("Random Distribution Verification Mode\n");
    calls.push_str(&format!("Tested on {}\n\n", date.format("%Y-%m-%d")));
    for name in &run.calls {
        calls.push_str(name);
        calls.push('\n');
    }
    let calls_path = dir.join(CALLS_FILE);
    std::fs::write(&calls_path, calls)
        .with_context(|| format!("failed to write {}", calls_path.display()))?;

    let mut summary = String::from(
        "A summary file of the data created during Random Distribution Verification Mode.\n",
    );
    for (key, count) in &run.tally {
        summary.push_str(&format!("{} {}\t{count}\n", key.first_name, key.last_name));
    }
    let summary_path = dir.join(SUMMARY_FILE);
    std::fs::write(&summary_path, summary)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    Ok((calls_path, summary_path))
}
