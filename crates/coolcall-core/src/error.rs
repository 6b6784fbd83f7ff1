//! Error types for roster import and queue persistence.
//!
//! Validation and I/O failures are kept apart so a caller can tell
//! "pick a different file" from "fix the contents of this file".

use std::path::PathBuf;

use thiserror::Error;

/// A roster line that failed validation.
///
/// `line` is the 1-based line number in the source file; the header is line 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The line did not split into exactly six fields.
    #[error(
        "line {line}: expected 6 fields, found {found}. Each entry should be formatted as \
         <first_name><delimiter><last_name><delimiter><id><delimiter><email_address>\
         <delimiter><phonetic_spelling><delimiter><reveal_code>"
    )]
    Format { line: usize, found: usize },

    /// The institutional ID is malformed.
    #[error("line {line}: {message} (got '{id}')")]
    Id {
        line: usize,
        id: String,
        message: &'static str,
    },

    /// The email address does not end in an accepted domain.
    #[error("line {line}: email address '{email}' does not end with an accepted domain")]
    Email { line: usize, email: String },

    /// The reveal code is not made of digits.
    #[error(
        "line {line}: reveal code '{code}' is invalid; use 0 for 'display' or any other number for 'do not display'"
    )]
    RevealCode { line: usize, code: String },
}

impl ValidationError {
    /// The 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ValidationError::Format { line, .. }
            | ValidationError::Id { line, .. }
            | ValidationError::Email { line, .. }
            | ValidationError::RevealCode { line, .. } => *line,
        }
    }
}

/// Errors that can occur when importing a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster file could not be opened or read.
    #[error("unable to read roster file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not UTF-8 text.
    #[error("{} is not a text file", path.display())]
    NotText { path: PathBuf },

    /// The contents failed validation. Nothing was imported.
    #[error("invalid roster: {0}")]
    Invalid(#[from] ValidationError),
}

impl RosterError {
    /// Returns `true` if the file itself was unusable, as opposed to its contents.
    pub fn is_io(&self) -> bool {
        matches!(self, RosterError::Io { .. } | RosterError::NotText { .. })
    }
}

/// A failed write of the roster or queue to disk.
///
/// The in-memory state that triggered the write is kept as-is.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Reasons a persisted queue could not be restored.
///
/// Every variant means the caller should seed a fresh queue from the roster.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// No snapshot location is configured, or no file exists there.
    #[error("no queue snapshot at {}", path.display())]
    Missing { path: PathBuf },

    /// The snapshot exists but could not be read.
    #[error("unable to read queue snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not a valid queue serialization.
    #[error("corrupt queue snapshot {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot does not hold exactly the eligible roster students.
    #[error("queue snapshot does not match the roster: {0}")]
    RosterMismatch(String),
}
