//! Per-student roster data and call history.

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reveal code marking a student as included in the on-deck rotation.
pub const REVEAL_INCLUDE: &str = "0";

/// A student shared between the roster and the fairness queue.
///
/// Call history recorded through one handle is visible through the other.
pub type SharedStudent = Rc<RefCell<StudentRecord>>;

/// The identity of a student for roster membership.
///
/// Excludes the institutional ID and all call history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentKey {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phonetic: String,
    pub reveal_code: String,
}

/// A single student in a course.
///
/// Identity fields are fixed at construction; call history changes only
/// through [`call_on`](Self::call_on) and [`adopt_history`](Self::adopt_history).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    first_name: String,
    last_name: String,
    /// Institutional ID (nine digits).
    id: String,
    email: String,
    phonetic: String,
    /// `"0"` to include on deck, anything else to exclude.
    reveal_code: String,
    /// Number of calls that were flagged.
    #[serde(default)]
    times_flagged: u32,
    /// Date of every call, oldest first.
    #[serde(default)]
    dates_called: Vec<NaiveDate>,
}

impl StudentRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        id: impl Into<String>,
        email: impl Into<String>,
        phonetic: impl Into<String>,
        reveal_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id: id.into(),
            email: email.into(),
            phonetic: phonetic.into(),
            reveal_code: reveal_code.into(),
            times_flagged: 0,
            dates_called: Vec::new(),
        }
    }

    /// Wrap the record for sharing between roster and queue.
    pub fn into_shared(self) -> SharedStudent {
        Rc::new(RefCell::new(self))
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }

    pub fn reveal_code(&self) -> &str {
        &self.reveal_code
    }

    /// Number of calls that were flagged.
    pub fn times_flagged(&self) -> u32 {
        self.times_flagged
    }

    /// Date of every call, oldest first.
    pub fn dates_called(&self) -> &[NaiveDate] {
        &self.dates_called
    }

    pub fn key(&self) -> StudentKey {
        StudentKey {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            email: self.email.clone(),
            phonetic: self.phonetic.clone(),
            reveal_code: self.reveal_code.clone(),
        }
    }

    /// Returns `true` if this record has the given identity key.
    pub fn has_key(&self, key: &StudentKey) -> bool {
        self.first_name == key.first_name
            && self.last_name == key.last_name
            && self.email == key.email
            && self.phonetic == key.phonetic
            && self.reveal_code == key.reveal_code
    }

    /// Record a cold call on `date`, counting it as flagged if requested.
    pub fn call_on(&mut self, flagged: bool, date: NaiveDate) {
        if flagged {
            self.times_flagged += 1;
        }
        self.dates_called.push(date);
    }

    pub fn times_called(&self) -> usize {
        self.dates_called.len()
    }

    /// "First Last".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the reveal code puts this student in the on-deck rotation.
    pub fn include_on_deck(&self) -> bool {
        self.reveal_code == REVEAL_INCLUDE
    }

    /// Overwrite call history with another record's.
    pub fn adopt_history(&mut self, other: &StudentRecord) {
        self.times_flagged = other.times_flagged;
        self.dates_called = other.dates_called.clone();
    }
}

impl PartialEq for StudentRecord {
    fn eq(&self, other: &Self) -> bool {
        self.has_key(&other.key()) && self.id == other.id
    }
}

impl Eq for StudentRecord {}

// Hash covers identity only: never the ID, never call history.
impl Hash for StudentRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first_name.hash(state);
        self.last_name.hash(state);
        self.email.hash(state);
        self.phonetic.hash(state);
        self.reveal_code.hash(state);
    }
}
