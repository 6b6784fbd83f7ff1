//! coolcall-report — Summary performance files, daily logs, and random
//! distribution verification.

pub mod daily_log;
pub mod summary;
pub mod verification;

pub use daily_log::DailyLog;
pub use summary::{generate_summary, write_summary};
pub use verification::{run_verification, write_verification, VerificationRun};
