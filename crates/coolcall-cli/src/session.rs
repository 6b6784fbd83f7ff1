//! Loading the stored roster and queue for a command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;

use coolcall_core::{load_config_from, CoolCallConfig, FairnessQueue, Roster};

/// How to bring the queue back from its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueLoad {
    /// Exact persisted order; used by commands that act on what was shown.
    Restore,
    /// Persisted order with the front/back shuffle; used at class start.
    Restart,
}

/// The stored roster and its fairness queue.
pub struct Session {
    pub config: CoolCallConfig,
    pub roster: Roster,
    pub queue: FairnessQueue,
}

impl Session {
    /// Load config, roster, and queue. A queue snapshot that is missing,
    /// corrupt, or out of date with the roster is replaced by a freshly
    /// seeded queue.
    pub fn open<R: Rng + ?Sized>(
        config_path: Option<PathBuf>,
        mode: QueueLoad,
        rng: &mut R,
    ) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let roster = load_roster(&config)?;

        let mut queue = FairnessQueue::new(config.queue_settings(), Some(config.queue_path()));
        let loaded = match mode {
            QueueLoad::Restore => queue.restore(&roster),
            QueueLoad::Restart => queue.load(&roster, rng),
        };

        match loaded {
            Ok(()) if mode == QueueLoad::Restart => {
                if let Err(e) = queue.persist() {
                    warn_persist(&e);
                }
            }
            Ok(()) => {}
            Err(e) => {
                tracing::warn!("{e}; seeding a new queue from the roster");
                if let Err(e) = queue.seed_from_roster(&roster, rng) {
                    warn_persist(&e);
                }
            }
        }

        Ok(Self {
            config,
            roster,
            queue,
        })
    }
}

/// Load the internally stored roster.
pub fn load_roster(config: &CoolCallConfig) -> Result<Roster> {
    let path = config.roster_path();
    if !path.exists() {
        anyhow::bail!(
            "no roster found at {}. Import one with `coolcall import --roster <file> --yes`",
            path.display()
        );
    }
    Roster::import(&path, &config.roster_settings())
        .with_context(|| format!("stored roster {} is unusable", path.display()))
}

/// Report a failed write without aborting the command.
pub fn warn_persist(e: &dyn std::error::Error) {
    tracing::warn!("{e}");
    eprintln!("Warning: {e}. The change is kept in memory only.");
}
