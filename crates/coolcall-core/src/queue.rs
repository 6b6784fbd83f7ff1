//! The fairness queue.
//!
//! Students wait in a single ordered list; the first `window_size` of them
//! are "on deck". A student taken off deck is reinserted at a random
//! position in the tail of the list, never inside the delay region at the
//! front, so they cannot come straight back on deck.
//!
//! The queue owns no random number generator. Every randomized operation
//! takes one from the caller, so each step is a function of the current
//! order plus fresh randomness.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::QueueSettings;
use crate::error::{PersistError, SnapshotError};
use crate::roster::Roster;
use crate::snapshot::QueueSnapshot;
use crate::student::{SharedStudent, StudentKey};

/// Positions a student may be reinserted at, given `n` students remaining
/// after their removal.
///
/// The lower bound is `floor(n * max(insert_delay, window_size / n))`,
/// computed in integers as `max(floor(n * insert_delay), window_size)` and
/// capped at `n`. The upper bound is `n` itself, i.e. the very end.
pub fn reinsertion_range(n: usize, window_size: usize, insert_delay: f64) -> RangeInclusive<usize> {
    let delay_start = (n as f64 * insert_delay).floor() as usize;
    let start = delay_start.max(window_size).min(n);
    start..=n
}

/// Ordered queue of every student eligible for the on-deck rotation.
#[derive(Debug)]
pub struct FairnessQueue {
    students: Vec<SharedStudent>,
    settings: QueueSettings,
    snapshot_path: Option<PathBuf>,
}

impl FairnessQueue {
    /// Create an empty queue. With `snapshot_path` set, every mutation is
    /// written there.
    pub fn new(settings: QueueSettings, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            students: Vec::new(),
            settings,
            snapshot_path,
        }
    }

    /// Fill the queue with the roster's eligible students in uniformly random order.
    ///
    /// The new order is kept even if persisting it fails.
    pub fn seed_from_roster<R: Rng + ?Sized>(
        &mut self,
        roster: &Roster,
        rng: &mut R,
    ) -> Result<(), PersistError> {
        self.students = roster.eligible();
        self.students.shuffle(rng);
        tracing::info!("seeded queue with {} students", self.students.len());
        self.persist()
    }

    /// Restore the persisted order exactly, without any shuffling.
    ///
    /// On failure the queue is left unchanged.
    pub fn restore(&mut self, roster: &Roster) -> Result<(), SnapshotError> {
        let path = self
            .snapshot_path
            .as_deref()
            .ok_or_else(|| SnapshotError::Missing {
                path: PathBuf::new(),
            })?;
        let snapshot = QueueSnapshot::load(path)?;
        self.students = snapshot.reconcile(roster)?;
        tracing::debug!(
            "restored queue of {} students from {}",
            self.students.len(),
            path.display()
        );
        Ok(())
    }

    /// Restore the persisted order, then shuffle the front and back
    /// segments independently to reintroduce randomness across restarts.
    ///
    /// On failure the caller should fall back to [`Self::seed_from_roster`].
    pub fn load<R: Rng + ?Sized>(
        &mut self,
        roster: &Roster,
        rng: &mut R,
    ) -> Result<(), SnapshotError> {
        self.restore(roster)?;
        self.shuffle_front_and_back(self.settings.insert_delay, rng);
        tracing::info!("loaded queue with {} students", self.students.len());
        Ok(())
    }

    /// The first `min(window_size, len)` students.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty or `window_size` is zero.
    pub fn get_on_deck(&self, window_size: usize) -> &[SharedStudent] {
        assert!(window_size > 0, "on-deck window size must be at least 1");
        assert!(
            !self.students.is_empty(),
            "on-deck window requested from an empty queue"
        );
        &self.students[..window_size.min(self.students.len())]
    }

    /// The on-deck window for the configured window size.
    pub fn on_deck(&self) -> &[SharedStudent] {
        self.get_on_deck(self.settings.window_size)
    }

    /// Remove `student` from deck and reinsert them at a random position
    /// past the delay region, then persist.
    ///
    /// The reorder stands even if persisting fails.
    ///
    /// # Panics
    ///
    /// Panics if `student` is not currently on deck.
    pub fn take_off_deck<R: Rng + ?Sized>(
        &mut self,
        student: &StudentKey,
        rng: &mut R,
    ) -> Result<(), PersistError> {
        let window_size = self.settings.window_size;
        let index = self
            .get_on_deck(window_size)
            .iter()
            .position(|s| s.borrow().has_key(student))
            .unwrap_or_else(|| {
                panic!(
                    "{} {} is not on deck",
                    student.first_name, student.last_name
                )
            });

        let removed = self.students.remove(index);
        let n = self.students.len();
        let range = reinsertion_range(n, window_size, self.settings.insert_delay);
        let target = if *range.start() >= n {
            n
        } else {
            rng.gen_range(range)
        };
        self.students.insert(target, removed);

        tracing::debug!(
            "moved {} {} from position {index} to {target}",
            student.first_name,
            student.last_name
        );
        self.persist()
    }

    /// Split at `floor(len * insert_delay)` and shuffle each side on its own.
    ///
    /// Nobody crosses the split point.
    pub fn shuffle_front_and_back<R: Rng + ?Sized>(&mut self, insert_delay: f64, rng: &mut R) {
        let midpoint = ((self.students.len() as f64 * insert_delay).floor() as usize)
            .min(self.students.len());
        let (front, back) = self.students.split_at_mut(midpoint);
        front.shuffle(rng);
        back.shuffle(rng);
    }

    /// Write the current order to the snapshot location, if one is set.
    pub fn persist(&self) -> Result<(), PersistError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        QueueSnapshot::capture(&self.students).save(path)?;
        tracing::debug!("persisted queue to {}", path.display());
        Ok(())
    }

    /// A copy of the queue that never touches disk.
    ///
    /// The copy shares student records with the original.
    pub fn detached(&self) -> Self {
        Self {
            students: self.students.iter().map(Rc::clone).collect(),
            settings: self.settings,
            snapshot_path: None,
        }
    }

    /// Current index of `student`, if queued.
    pub fn position(&self, student: &StudentKey) -> Option<usize> {
        self.students.iter().position(|s| s.borrow().has_key(student))
    }

    /// The whole queue, front first.
    pub fn students(&self) -> &[SharedStudent] {
        &self.students
    }

    pub fn settings(&self) -> QueueSettings {
        self.settings
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
