//! coolcall-core — Roster store, fairness queue, and queue persistence.
//!
//! This crate holds the cold-call bookkeeping that the coolcall controller
//! drives: validated rosters, the randomized fairness queue that decides who
//! is on deck, and the snapshot that carries the queue across restarts.

pub mod config;
pub mod error;
pub mod queue;
pub mod roster;
pub mod snapshot;
pub mod student;

pub use config::{load_config, load_config_from, CoolCallConfig, QueueSettings, RosterSettings};
pub use error::{PersistError, RosterError, SnapshotError, ValidationError};
pub use queue::{reinsertion_range, FairnessQueue};
pub use roster::{changed_names, Roster};
pub use snapshot::QueueSnapshot;
pub use student::{SharedStudent, StudentKey, StudentRecord};
