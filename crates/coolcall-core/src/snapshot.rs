//! Queue snapshots: an order-preserving JSON copy of the fairness queue.
//!
//! Each entry is a full [`StudentRecord`], call history included, so the
//! history survives a restart along with the order.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PersistError, SnapshotError};
use crate::roster::Roster;
use crate::student::{SharedStudent, StudentRecord};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A persisted queue ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// Students in queue order, front first.
    pub students: Vec<StudentRecord>,
}

impl QueueSnapshot {
    pub fn capture(students: &[SharedStudent]) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            students: students.iter().map(|s| s.borrow().clone()).collect(),
        }
    }

    /// Write the snapshot to `path`, replacing any previous one atomically.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let wrap = |source| PersistError {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_vec_pretty(self).map_err(|e| wrap(std::io::Error::other(e)))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(wrap)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
        tmp.write_all(&json).map_err(wrap)?;
        tmp.as_file().sync_all().map_err(wrap)?;
        tmp.persist(path).map_err(|e| wrap(e.error))?;
        Ok(())
    }

    /// Read a snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SnapshotError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let corrupt = |source| SnapshotError::Corrupt {
            path: path.to_path_buf(),
            source,
        };
        let snapshot: QueueSnapshot = serde_json::from_str(&content).map_err(corrupt)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(corrupt(<serde_json::Error as serde::de::Error>::custom(
                format!("unsupported snapshot version {}", snapshot.version),
            )));
        }
        Ok(snapshot)
    }

    /// Map each snapshot entry onto the roster's shared record.
    ///
    /// Succeeds only if the snapshot holds every eligible roster student
    /// exactly once and nobody else. On success the snapshot's call history
    /// is copied onto the roster records.
    pub fn reconcile(&self, roster: &Roster) -> Result<Vec<SharedStudent>, SnapshotError> {
        let mut seen = HashSet::new();
        let mut students = Vec::with_capacity(self.students.len());

        for record in &self.students {
            let shared = roster.find(record).ok_or_else(|| {
                SnapshotError::RosterMismatch(format!(
                    "{} is not on the roster",
                    record.display_name()
                ))
            })?;
            if !shared.borrow().include_on_deck() {
                return Err(SnapshotError::RosterMismatch(format!(
                    "{} is excluded from the rotation",
                    record.display_name()
                )));
            }
            if !seen.insert(record.key()) {
                return Err(SnapshotError::RosterMismatch(format!(
                    "{} appears more than once",
                    record.display_name()
                )));
            }
            students.push(shared.clone());
        }

        let eligible = roster.eligible().len();
        if students.len() != eligible {
            return Err(SnapshotError::RosterMismatch(format!(
                "snapshot has {} students, roster has {eligible} eligible",
                students.len()
            )));
        }

        for (shared, record) in students.iter().zip(&self.students) {
            shared.borrow_mut().adopt_history(record);
        }
        Ok(students)
    }
}
