//! Chart-ready score series.

use serde::{Deserialize, Serialize};

use crate::model::{ExamRecord, Subject, UniversityTarget};

/// Parallel label/value sequences for one trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveData {
    /// One label per record (the record name).
    pub labels: Vec<String>,
    /// One value per record. `None` marks a gap in the line.
    pub scores: Vec<Option<u32>>,
    /// Set for a per-subject curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    /// Goals to draw as reference lines (total curve only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<UniversityTarget>>,
}

impl CurveData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(label, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (&str, Option<u32>)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

/// Total score of every record, with the goal list attached.
pub fn total_curve(records: &[ExamRecord], goals: &[UniversityTarget]) -> CurveData {
    CurveData {
        labels: labels(records),
        scores: records.iter().map(|r| Some(r.total_score)).collect(),
        subject: None,
        goals: Some(goals.to_vec()),
    }
}

/// One subject across every record. Records without the subject yield `None`.
pub fn subject_curve(records: &[ExamRecord], subject: Subject) -> CurveData {
    CurveData {
        labels: labels(records),
        scores: records.iter().map(|r| r.score(subject)).collect(),
        subject: Some(subject),
        goals: None,
    }
}

fn labels(records: &[ExamRecord]) -> Vec<String> {
    records.iter().map(|r| r.exam_name.clone()).collect()
}
