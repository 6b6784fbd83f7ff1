//! Summary performance file.
//!
//! Rewritten after every cold call with each student's running totals.

use std::path::Path;

use anyhow::{Context, Result};

use coolcall_core::{SharedStudent, StudentRecord};

pub const SUMMARY_TITLE: &str = "Summary Performance File for Cold Call Assist program";

pub const SUMMARY_COLUMNS: &str = "|Total Times Called|\t|Total Times Flagged|\t|First Name|\t\
|Last Name|\t|ID|\t|Email Address|\t|Phonetic Spelling|\t|Reveal Code|\t|Dates Called|";

/// One tab-separated line for `student`, without a trailing newline.
pub fn summary_line(student: &StudentRecord) -> String {
    let mut line = format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
        student.times_called(),
        student.times_flagged(),
        student.first_name(),
        student.last_name(),
        student.id(),
        student.email(),
        student.phonetic(),
        student.reveal_code(),
    );
    for date in student.dates_called() {
        line.push_str(&format!("{} ", date.format("%Y-%m-%d")));
    }
    line
}

/// Generate the full summary text.
pub fn generate_summary<'a>(students: impl IntoIterator<Item = &'a SharedStudent>) -> String {
    let mut out = String::new();
    out.push_str(SUMMARY_TITLE);
    out.push('\n');
    out.push_str(SUMMARY_COLUMNS);
    out.push('\n');
    for student in students {
        out.push_str(&summary_line(&student.borrow()));
        out.push('\n');
    }
    out
}

/// Overwrite `path` with the summary for `students`.
pub fn write_summary<'a>(
    students: impl IntoIterator<Item = &'a SharedStudent>,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_summary(students))
        .with_context(|| format!("failed to write summary to {}", path.display()))?;
    tracing::debug!("wrote summary to {}", path.display());
    Ok(())
}
