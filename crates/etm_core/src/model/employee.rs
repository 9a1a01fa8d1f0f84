//! Employee record domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted and rendered by the tracker.
//! - Keep score range rules in the type system via `Score`.
//!
//! # Invariants
//! - `contribution` and `task_completed` are always within `[0, 100]`.
//! - Text fields (`emp_id`, `position`, `name`, `activities`) are non-empty.
//! - `remarks` is derived from the two scores at write time and is never
//!   recomputed on load.
//!
//! # See also
//! - `crate::remark` for the derivation rules.

use crate::remark::derive_remark;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound (inclusive) for both score fields.
pub const SCORE_MAX: u8 = 100;

/// Integer score constrained to `[0, 100]`.
///
/// Serialized as a plain JSON integer. Deserialization rejects out-of-range
/// values, so a persisted set with a bad score is treated as corrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Builds a score, returning `None` when `value` is outside `[0, 100]`.
    pub fn new(value: i64) -> Option<Self> {
        if (0..=i64::from(SCORE_MAX)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ScoreOutOfRange(value))
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw integer that does not fit the score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutOfRange(pub i64);

impl Display for ScoreOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "score {} is outside 0..={SCORE_MAX}", self.0)
    }
}

impl Error for ScoreOutOfRange {}

/// Field-level validation failure for employee input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is missing or blank after trimming.
    EmptyField(&'static str),
    /// Score field could not be parsed as an integer.
    NotNumeric { field: &'static str, value: String },
    /// Score field parsed but falls outside `[0, 100]`.
    OutOfRange { field: &'static str, value: i64 },
}

impl ValidationError {
    /// Returns the prompt shown to the user for this class of failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyField(_) | Self::NotNumeric { .. } => {
                "Please fill all fields correctly. Contribution & Task Completed must be numeric (0-100)."
            }
            Self::OutOfRange { .. } => {
                "Contribution and Task Completed must be between 0 and 100."
            }
        }
    }

    /// Returns the offending field name.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField(field)
            | Self::NotNumeric { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "field `{field}` is required"),
            Self::NotNumeric { field, value } => {
                write!(f, "field `{field}` must be numeric, got `{value}`")
            }
            Self::OutOfRange { field, value } => write!(
                f,
                "field `{field}` must be between 0 and {SCORE_MAX}, got {value}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Six user-editable fields of an employee record, already validated.
///
/// Produced by the form boundary (`crate::form::CandidateInput::parse`) or
/// built directly by trusted callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCandidate {
    pub emp_id: String,
    pub position: String,
    pub name: String,
    pub contribution: Score,
    pub activities: String,
    pub task_completed: Score,
}

impl RecordCandidate {
    /// Checks the text-field contract without touching scores.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text_fields([
            ("empId", self.emp_id.as_str()),
            ("position", self.position.as_str()),
            ("name", self.name.as_str()),
            ("activities", self.activities.as_str()),
        ])
    }
}

/// Canonical employee entry as stored and displayed.
///
/// Field order and camelCase names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub emp_id: String,
    pub position: String,
    pub name: String,
    pub contribution: Score,
    pub activities: String,
    pub task_completed: Score,
    /// Derived at write time; kept as stored text.
    pub remarks: String,
}

impl EmployeeRecord {
    /// Builds a record from a candidate, deriving `remarks` from its scores.
    pub fn from_candidate(candidate: RecordCandidate) -> Self {
        let remarks = derive_remark(candidate.contribution, candidate.task_completed)
            .as_str()
            .to_string();
        Self {
            emp_id: candidate.emp_id,
            position: candidate.position,
            name: candidate.name,
            contribution: candidate.contribution,
            activities: candidate.activities,
            task_completed: candidate.task_completed,
            remarks,
        }
    }

    /// Returns the user-editable part of this record.
    pub fn to_candidate(&self) -> RecordCandidate {
        RecordCandidate {
            emp_id: self.emp_id.clone(),
            position: self.position.clone(),
            name: self.name.clone(),
            contribution: self.contribution,
            activities: self.activities.clone(),
            task_completed: self.task_completed,
        }
    }

    /// Validates text-field invariants.
    ///
    /// Scores are range-checked by `Score` itself. `remarks` is not checked
    /// against the current rules; stale remarks are accepted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text_fields([
            ("empId", self.emp_id.as_str()),
            ("position", self.position.as_str()),
            ("name", self.name.as_str()),
            ("activities", self.activities.as_str()),
        ])
    }
}

/// Checks the four text fields in form order, reporting the first blank one.
fn validate_text_fields(fields: [(&'static str, &str); 4]) -> Result<(), ValidationError> {
    match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ValidationError::EmptyField(field)),
        None => Ok(()),
    }
}
