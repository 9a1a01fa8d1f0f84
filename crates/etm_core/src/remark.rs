//! Qualitative remark derivation.
//!
//! # Responsibility
//! - Map `(contribution, task_completed)` to one of six fixed remarks.
//!
//! # Invariants
//! - Rules are evaluated in order and the first match wins; ranges overlap,
//!   so reordering changes results.
//! - The function is pure and total over valid scores.

use crate::model::employee::Score;
use serde::Serialize;

/// Fixed remark categories, listed from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Remark {
    TopPerformer,
    Outstanding,
    Great,
    Good,
    NeedsImprovement,
    BelowExpectations,
}

impl Remark {
    /// All categories in rule-priority order.
    pub const ALL: [Remark; 6] = [
        Remark::TopPerformer,
        Remark::Outstanding,
        Remark::Great,
        Remark::Good,
        Remark::NeedsImprovement,
        Remark::BelowExpectations,
    ];

    /// Text stored in `EmployeeRecord::remarks`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopPerformer => "🌟 Exceptional — top performer!",
            Self::Outstanding => "🌟 Outstanding performance!",
            Self::Great => "👍 Great job!",
            Self::Good => "🙂 Good — room to grow.",
            Self::NeedsImprovement => "⚠️ Needs improvement.",
            Self::BelowExpectations => "❌ Below expectations.",
        }
    }

    /// Reverse lookup from stored text. Unknown (e.g. stale) text yields `None`.
    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|remark| remark.as_str() == text)
    }
}

/// Derives the remark for a pair of scores.
pub fn derive_remark(contribution: Score, task_completed: Score) -> Remark {
    let contribution = contribution.value();
    let task = task_completed.value();

    if task >= 95 && contribution >= 90 {
        Remark::TopPerformer
    } else if task >= 90 && contribution >= 80 {
        Remark::Outstanding
    } else if task >= 75 && contribution >= 60 {
        Remark::Great
    } else if task >= 60 {
        Remark::Good
    } else if task >= 40 {
        Remark::NeedsImprovement
    } else {
        Remark::BelowExpectations
    }
}
