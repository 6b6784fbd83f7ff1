//! Append-only daily log of cold calls.
//!
//! One file per day, `daily_log--YYYY-MM-DD.txt`:
//!
//! ```text
//! Daily Log for Cold Call Assist Program
//! 2022-01-16
//! X	Amy Reichhold <areichh2@uoregon.edu>
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use coolcall_core::StudentRecord;

pub const DAILY_LOG_HEADING: &str = "Daily Log for Cold Call Assist Program";

/// Marker written before a flagged call.
pub const FLAG_MARK: &str = "X";

/// Writes cold calls to per-day log files in a directory.
#[derive(Debug, Clone)]
pub struct DailyLog {
    dir: PathBuf,
}

impl DailyLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Log file for `date`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("daily_log--{}.txt", date.format("%Y-%m-%d")))
    }

    /// Append a call on `student` to the log for `date`, creating the file
    /// with its heading if needed. Returns the file written.
    pub fn record(
        &self,
        student: &StudentRecord,
        flagged: bool,
        date: NaiveDate,
    ) -> Result<PathBuf> {
        let path = self.path_for(date);
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create log directory {}", self.dir.display()))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open daily log {}", path.display()))?;

        let is_new = file
            .metadata()
            .with_context(|| format!("failed to inspect daily log {}", path.display()))?
            .len()
            == 0;
        let mut text = String::new();
        if is_new {
            text.push_str(DAILY_LOG_HEADING);
            text.push('\n');
            text.push_str(&date.format("%Y-%m-%d").to_string());
            text.push('\n');
        }
        text.push_str(&log_line(student, flagged));
        text.push('\n');

        file.write_all(text.as_bytes())
            .with_context(|| format!("failed to append to daily log {}", path.display()))?;
        Ok(path)
    }
}

/// `X\tFirst Last <email>` for a flagged call, `\tFirst Last <email>` otherwise.
pub fn log_line(student: &StudentRecord, flagged: bool) -> String {
    let mark = if flagged { FLAG_MARK } else { "" };
    format!(
        "{mark}\t{} {} <{}>",
        student.first_name(),
        student.last_name(),
        student.email()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amy() -> StudentRecord {
        StudentRecord::new(
            "Amy",
            "Reichhold",
            "951000000",
            "areichh2@uoregon.edu",
            "AY-mee",
            "0",
        )
    }

    #[test]
    fn flagged_and_unflagged_lines() {
        assert_eq!(log_line(&amy(), true), "X\tAmy Reichhold <areichh2@uoregon.edu>");
        assert_eq!(log_line(&amy(), false), "\tAmy Reichhold <areichh2@uoregon.edu>");
    }

    #[test]
    fn heading_written_once_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let log = DailyLog::new(dir.path());
        let day = NaiveDate::from_ymd_opt(2022, 1, 16).unwrap();

        let path = log.record(&amy(), true, day).unwrap();
        log.record(&amy(), false, day).unwrap();

        assert_eq!(path, dir.path().join("daily_log--2022-01-16.txt"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Daily Log for Cold Call Assist Program\n2022-01-16\n\
             X\tAmy Reichhold <areichh2@uoregon.edu>\n\
             \tAmy Reichhold <areichh2@uoregon.edu>\n"
        );
    }

    #[test]
    fn new_day_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = DailyLog::new(dir.path());
        let first = log
            .record(&amy(), false, NaiveDate::from_ymd_opt(2022, 1, 16).unwrap())
            .unwrap();
        let second = log
            .record(&amy(), false, NaiveDate::from_ymd_opt(2022, 1, 17).unwrap())
            .unwrap();
        assert_ne!(first, second);
        assert!(std::fs::read_to_string(second)
            .unwrap()
            .starts_with(DAILY_LOG_HEADING));
    }

    #[test]
    fn empty_existing_file_gets_heading() {
        let dir = tempfile::tempdir().unwrap();
        let log = DailyLog::new(dir.path());
        let day = NaiveDate::from_ymd_opt(2022, 1, 16).unwrap();
        std::fs::write(log.path_for(day), "").unwrap();

        let path = log.record(&amy(), false, day).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Daily Log for Cold Call Assist Program\n2022-01-16\n"));
    }
}
