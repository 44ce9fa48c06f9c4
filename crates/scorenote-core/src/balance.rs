//! Subject balance of a single record.
//!
//! Subjects have different full marks, so scores are rescaled to a common
//! 150-point axis before they are compared side by side.

use serde::{Deserialize, Serialize};

use crate::model::{ExamRecord, Subject};

/// Common scale every subject is normalized to.
pub const BALANCE_SCALE: f64 = 150.0;

/// One axis of the balance view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPoint {
    pub subject: Subject,
    pub label: String,
    /// Score as entered.
    pub original_score: u32,
    /// Score rescaled to [`BALANCE_SCALE`], rounded.
    pub normalized_score: u32,
    pub full_mark: u32,
}

/// Normalize every subject present in `record`. Absent subjects are skipped.
pub fn subject_balance(record: &ExamRecord) -> Vec<SubjectPoint> {
    Subject::ALL
        .into_iter()
        .filter_map(|subject| {
            let original_score = record.score(subject)?;
            let full_mark = subject.full_mark();
            let normalized = f64::from(original_score) / f64::from(full_mark) * BALANCE_SCALE;
            Some(SubjectPoint {
                subject,
                label: subject.label().to_string(),
                original_score,
                normalized_score: normalized.round() as u32,
                full_mark,
            })
        })
        .collect()
}
