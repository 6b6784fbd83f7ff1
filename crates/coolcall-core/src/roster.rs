//! Roster store: parse, validate, compare, and persist the class list.
//!
//! A roster file is delimiter-separated text. The first line is a header
//! and is never parsed; every following line is
//! `first<D>last<D>id<D>email<D>phonetic<D>reveal_code`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::RosterSettings;
use crate::error::{PersistError, RosterError, ValidationError};
use crate::student::{SharedStudent, StudentKey, StudentRecord};

/// Number of fields in every roster data line.
pub const FIELD_COUNT: usize = 6;

/// Length of an institutional ID.
pub const ID_LENGTH: usize = 9;

/// Default file name used by [`Roster::export`].
pub const EXPORT_STEM: &str = "roster";

/// All the students currently enrolled in a course.
///
/// Membership is keyed by [`StudentKey`]; a second line with the same key
/// is merged into the first one seen.
#[derive(Debug, Default)]
pub struct Roster {
    students: BTreeMap<StudentKey, SharedStudent>,
    source: String,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a roster file.
    ///
    /// Either every line is imported or none is.
    pub fn import(path: &Path, settings: &RosterSettings) -> Result<Self, RosterError> {
        let bytes = std::fs::read(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| RosterError::NotText {
            path: path.to_path_buf(),
        })?;

        let roster = Self::parse(&text, settings)?;
        tracing::debug!(
            "imported {} students from {}",
            roster.len(),
            path.display()
        );
        Ok(roster)
    }

    /// Validate and parse roster text.
    pub fn parse(text: &str, settings: &RosterSettings) -> Result<Self, ValidationError> {
        let rows = validate(text, settings)?;

        let mut students = BTreeMap::new();
        for fields in rows {
            let record = StudentRecord::new(
                fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
            );
            let key = record.key();
            if students.contains_key(&key) {
                tracing::debug!("merging duplicate roster entry for {}", record.display_name());
                continue;
            }
            students.insert(key, record.into_shared());
        }

        Ok(Self {
            students,
            source: text.to_string(),
        })
    }

    /// Write the validated source text, verbatim, to `path`.
    pub fn persist(&self, path: &Path) -> Result<(), PersistError> {
        let wrap = |source| PersistError {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(wrap)?;
        }
        std::fs::write(path, &self.source).map_err(wrap)?;
        tracing::debug!("persisted roster to {}", path.display());
        Ok(())
    }

    /// Export to `dir/roster.txt`, or the first free `dir/roster<i>.txt`.
    ///
    /// Returns the path written.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, PersistError> {
        let path = export_path(dir);
        std::fs::write(&path, &self.source).map_err(|source| PersistError {
            path: path.clone(),
            source,
        })?;
        tracing::info!("exported roster to {}", path.display());
        Ok(path)
    }

    /// Students present in exactly one of the two rosters.
    ///
    /// A student whose email (or any other identity field) changed appears
    /// twice: once as stored in `self`, once as stored in `other`.
    pub fn compare(&self, other: &Roster) -> Vec<StudentRecord> {
        let mut diff: Vec<StudentRecord> = self
            .only_in(other)
            .chain(other.only_in(self))
            .collect();
        diff.sort_by_key(StudentRecord::key);
        diff
    }

    fn only_in<'a>(&'a self, other: &'a Roster) -> impl Iterator<Item = StudentRecord> + 'a {
        self.students.values().filter_map(move |student| {
            let record = student.borrow();
            if other.find(&record).is_some() {
                None
            } else {
                Some(record.clone())
            }
        })
    }

    /// The shared record equal to `record` (same identity and ID), if any.
    pub fn find(&self, record: &StudentRecord) -> Option<&SharedStudent> {
        self.students
            .get(&record.key())
            .filter(|found| found.borrow().id() == record.id())
    }

    pub fn get(&self, key: &StudentKey) -> Option<&SharedStudent> {
        self.students.get(key)
    }

    /// All students, ordered by last name then first name.
    pub fn students(&self) -> impl Iterator<Item = &SharedStudent> {
        self.students.values()
    }

    /// Handles to every student whose reveal code includes them on deck.
    pub fn eligible(&self) -> Vec<SharedStudent> {
        self.students
            .values()
            .filter(|s| s.borrow().include_on_deck())
            .map(Rc::clone)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// The raw text this roster was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Check every data line, returning the split fields of each.
///
/// Stops at the first invalid line.
fn validate<'a>(
    text: &'a str,
    settings: &RosterSettings,
) -> Result<Vec<Vec<&'a str>>, ValidationError> {
    let mut rows = Vec::new();

    for (index, raw) in text.lines().enumerate().skip(1) {
        let line = index + 1;
        let fields: Vec<&str> = raw.trim().split(settings.delimiter.as_str()).collect();
        if fields.len() != FIELD_COUNT {
            return Err(ValidationError::Format {
                line,
                found: fields.len(),
            });
        }

        let id = fields[2];
        if id.chars().count() != ID_LENGTH {
            return Err(ValidationError::Id {
                line,
                id: id.to_string(),
                message: "IDs must be 9 digits long",
            });
        }
        if !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Id {
                line,
                id: id.to_string(),
                message: "IDs must only contain digits",
            });
        }

        let email = fields[3];
        if !settings
            .email_suffixes
            .iter()
            .any(|suffix| email.ends_with(suffix.as_str()))
        {
            return Err(ValidationError::Email {
                line,
                email: email.to_string(),
            });
        }

        let code = fields[5];
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::RevealCode {
                line,
                code: code.to_string(),
            });
        }

        rows.push(fields);
    }

    Ok(rows)
}

fn export_path(dir: &Path) -> PathBuf {
    let preferred = dir.join(format!("{EXPORT_STEM}.txt"));
    if !preferred.exists() {
        return preferred;
    }
    (0..)
        .map(|i| dir.join(format!("{EXPORT_STEM}{i}.txt")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(preferred)
}

/// Display names of the students in a [`Roster::compare`] result.
///
/// Duplicates (the old and new entry of one person) collapse to one name.
/// Sorted by last name, then first name.
pub fn changed_names(diff: &[StudentRecord]) -> Vec<String> {
    let unique: BTreeSet<(&str, &str)> = diff
        .iter()
        .map(|s| (s.last_name(), s.first_name()))
        .collect();
    unique
        .into_iter()
        .map(|(last, first)| format!("{first} {last}"))
        .collect()
}
