//! Form boundary helpers.
//!
//! # Responsibility
//! - Turn raw form strings into a validated `RecordCandidate`.
//! - Track which record (if any) the form is editing.
//! - Project a stored record back into form fields for editing.
//!
//! # Invariants
//! - Text fields are trimmed before they are checked or stored.
//! - Presence/numeric checks run before range checks, so a form with both a
//!   blank field and an out-of-range score reports the blank field.
//! - The edit cursor is UI state; the repository never reads it.

use crate::model::employee::{EmployeeRecord, RecordCandidate, Score, ValidationError};

/// Raw, untrimmed form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateInput {
    pub emp_id: String,
    pub position: String,
    pub name: String,
    pub contribution: String,
    pub activities: String,
    pub task_completed: String,
}

impl CandidateInput {
    /// Validates the input and builds a candidate.
    ///
    /// # Errors
    /// - `EmptyField` for a blank text field.
    /// - `NotNumeric` for a score that is not an integer.
    /// - `OutOfRange` for a score outside `[0, 100]`.
    pub fn parse(&self) -> Result<RecordCandidate, ValidationError> {
        let emp_id = required_text("empId", &self.emp_id)?;
        let position = required_text("position", &self.position)?;
        let name = required_text("name", &self.name)?;
        let contribution = numeric("contribution", &self.contribution)?;
        let activities = required_text("activities", &self.activities)?;
        let task_completed = numeric("taskCompleted", &self.task_completed)?;

        Ok(RecordCandidate {
            emp_id,
            position,
            name,
            contribution: in_range("contribution", contribution)?,
            activities,
            task_completed: in_range("taskCompleted", task_completed)?,
        })
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Whole-string integer parse; a numeric prefix such as `85%` or `9.5` is
/// rejected rather than truncated.
fn numeric(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: trimmed.to_string(),
        })
}

fn in_range(field: &'static str, value: i64) -> Result<Score, ValidationError> {
    Score::new(value).ok_or(ValidationError::OutOfRange { field, value })
}

/// Where a form submission is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Add,
    UpdateAt(usize),
}

/// "Currently editing index N" or "not editing".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditCursor {
    #[default]
    Idle,
    Editing(usize),
}

impl EditCursor {
    pub fn action(self) -> SubmitAction {
        match self {
            Self::Idle => SubmitAction::Add,
            Self::Editing(index) => SubmitAction::UpdateAt(index),
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Idle => "Add Employee",
            Self::Editing(_) => "Save Changes",
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Resets to "not editing" (the clear action).
    pub fn clear(&mut self) {
        *self = Self::Idle;
    }
}

/// Form field values populated from a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub index: usize,
    pub input: CandidateInput,
    pub remarks: String,
}

impl FormSnapshot {
    pub fn from_record(index: usize, record: &EmployeeRecord) -> Self {
        Self {
            index,
            input: CandidateInput {
                emp_id: record.emp_id.clone(),
                position: record.position.clone(),
                name: record.name.clone(),
                contribution: record.contribution.to_string(),
                activities: record.activities.clone(),
                task_completed: record.task_completed.to_string(),
            },
            remarks: record.remarks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateInput, EditCursor, FormSnapshot, SubmitAction};
    use crate::model::employee::{EmployeeRecord, ValidationError};

    fn input() -> CandidateInput {
        CandidateInput {
            emp_id: " E1 ".to_string(),
            position: "Eng".to_string(),
            name: " Ann".to_string(),
            contribution: "92".to_string(),
            activities: "shipped v2 ".to_string(),
            task_completed: " 96".to_string(),
        }
    }

    #[test]
    fn parse_trims_and_converts() {
        let candidate = input().parse().unwrap();
        assert_eq!(candidate.emp_id, "E1");
        assert_eq!(candidate.name, "Ann");
        assert_eq!(candidate.activities, "shipped v2");
        assert_eq!(candidate.contribution.value(), 92);
        assert_eq!(candidate.task_completed.value(), 96);
    }

    #[test]
    fn parse_reports_blank_before_range() {
        let mut raw = input();
        raw.name = "   ".to_string();
        raw.contribution = "150".to_string();
        assert_eq!(raw.parse().unwrap_err(), ValidationError::EmptyField("name"));
    }

    #[test]
    fn parse_rejects_non_numeric_and_out_of_range() {
        let mut raw = input();
        raw.task_completed = "lots".to_string();
        assert!(matches!(
            raw.parse().unwrap_err(),
            ValidationError::NotNumeric { field: "taskCompleted", .. }
        ));

        for partial in ["85%", "9.5"] {
            let mut raw = input();
            raw.contribution = partial.to_string();
            assert!(matches!(
                raw.parse().unwrap_err(),
                ValidationError::NotNumeric { field: "contribution", .. }
            ));
        }

        let mut raw = input();
        raw.contribution = "-1".to_string();
        let err = raw.parse().unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "contribution",
                value: -1
            }
        );
        assert_eq!(
            err.user_message(),
            "Contribution and Task Completed must be between 0 and 100."
        );
    }

    #[test]
    fn cursor_routes_submissions() {
        let mut cursor = EditCursor::default();
        assert_eq!(cursor.action(), SubmitAction::Add);
        assert_eq!(cursor.submit_label(), "Add Employee");

        cursor = EditCursor::Editing(3);
        assert_eq!(cursor.action(), SubmitAction::UpdateAt(3));
        assert_eq!(cursor.submit_label(), "Save Changes");

        cursor.clear();
        assert!(!cursor.is_editing());
    }

    #[test]
    fn snapshot_round_trips_through_parse() {
        let record = EmployeeRecord::from_candidate(input().parse().unwrap());
        let snapshot = FormSnapshot::from_record(0, &record);
        assert_eq!(snapshot.input.parse().unwrap(), record.to_candidate());
        assert_eq!(snapshot.remarks, record.remarks);
    }
}
