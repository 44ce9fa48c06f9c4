//! Core data model types for scorenote.
//!
//! Exam records, subject scores, and score goals. These are the shapes that
//! get persisted in the key-value store and written to backup files, so the
//! serde layout here is the on-disk format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScoreNoteError};

/// Largest score accepted for a single subject (three digits).
pub const MAX_SUBJECT_SCORE: u32 = 999;

/// Colour given to goals created without one.
pub const DEFAULT_GOAL_COLOR: &str = "#3b82f6";

/// The subjects a record can carry a score for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Chinese,
    Math,
    English,
    Physics,
    Chemistry,
    Biology,
    History,
    Geography,
    Politics,
}

impl Subject {
    /// All subjects, in record field order.
    pub const ALL: [Subject; 9] = [
        Subject::Chinese,
        Subject::Math,
        Subject::English,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::History,
        Subject::Geography,
        Subject::Politics,
    ];

    /// Lowercase key used in JSON and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Subject::Chinese => "chinese",
            Subject::Math => "math",
            Subject::English => "english",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::Politics => "politics",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Subject::Chinese => "Chinese",
            Subject::Math => "Math",
            Subject::English => "English",
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::Politics => "Politics",
        }
    }

    /// Full mark for the subject: 150 for the three core subjects, 100 otherwise.
    pub fn full_mark(self) -> u32 {
        match self {
            Subject::Chinese | Subject::Math | Subject::English => 150,
            _ => 100,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Subject::ALL
            .into_iter()
            .find(|subject| subject.key() == lower)
            .ok_or_else(|| format!("unknown subject: {s}"))
    }
}

/// Scores entered for a new record. Absent subjects were not taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoresInput {
    #[serde(default)]
    pub chinese: Option<u32>,
    #[serde(default)]
    pub math: Option<u32>,
    #[serde(default)]
    pub english: Option<u32>,
    #[serde(default)]
    pub physics: Option<u32>,
    #[serde(default)]
    pub chemistry: Option<u32>,
    #[serde(default)]
    pub biology: Option<u32>,
    #[serde(default)]
    pub history: Option<u32>,
    #[serde(default)]
    pub geography: Option<u32>,
    #[serde(default)]
    pub politics: Option<u32>,
}

impl ScoresInput {
    /// Set one subject's score, builder style.
    pub fn with(mut self, subject: Subject, score: u32) -> Self {
        *self.slot_mut(subject) = Some(score);
        self
    }

    /// The entered score for `subject`, if any.
    pub fn get(&self, subject: Subject) -> Option<u32> {
        match subject {
            Subject::Chinese => self.chinese,
            Subject::Math => self.math,
            Subject::English => self.english,
            Subject::Physics => self.physics,
            Subject::Chemistry => self.chemistry,
            Subject::Biology => self.biology,
            Subject::History => self.history,
            Subject::Geography => self.geography,
            Subject::Politics => self.politics,
        }
    }

    fn slot_mut(&mut self, subject: Subject) -> &mut Option<u32> {
        match subject {
            Subject::Chinese => &mut self.chinese,
            Subject::Math => &mut self.math,
            Subject::English => &mut self.english,
            Subject::Physics => &mut self.physics,
            Subject::Chemistry => &mut self.chemistry,
            Subject::Biology => &mut self.biology,
            Subject::History => &mut self.history,
            Subject::Geography => &mut self.geography,
            Subject::Politics => &mut self.politics,
        }
    }

    /// Sum of the entered scores. Absent subjects count as zero.
    pub fn total(&self) -> u32 {
        Subject::ALL.iter().filter_map(|s| self.get(*s)).sum()
    }

    /// Returns `true` when no subject has a score.
    pub fn is_empty(&self) -> bool {
        Subject::ALL.iter().all(|s| self.get(*s).is_none())
    }

    /// Reject scores above [`MAX_SUBJECT_SCORE`].
    pub fn validate(&self) -> Result<()> {
        for subject in Subject::ALL {
            if let Some(value) = self.get(subject) {
                if value > MAX_SUBJECT_SCORE {
                    return Err(ScoreNoteError::InvalidScore {
                        subject,
                        value,
                        max: MAX_SUBJECT_SCORE,
                    });
                }
            }
        }
        Ok(())
    }
}

/// One stored exam attempt.
///
/// Field order matters: it is the serialization order of backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Millisecond timestamp, strictly increasing across records.
    pub id: i64,
    /// Display name, e.g. "Record #3".
    pub exam_name: String,
    /// Date in `YYYY-MM-DD` form.
    pub exam_date: String,
    /// Sum of the present subject scores at write time.
    pub total_score: u32,
    pub chinese: Option<u32>,
    pub math: Option<u32>,
    pub english: Option<u32>,
    pub physics: Option<u32>,
    pub chemistry: Option<u32>,
    pub biology: Option<u32>,
    pub history: Option<u32>,
    pub geography: Option<u32>,
    pub politics: Option<u32>,
}

impl ExamRecord {
    /// Build a record from entered scores, deriving the total.
    pub fn from_scores(id: i64, exam_name: String, exam_date: String, scores: &ScoresInput) -> Self {
        Self {
            id,
            exam_name,
            exam_date,
            total_score: scores.total(),
            chinese: scores.chinese,
            math: scores.math,
            english: scores.english,
            physics: scores.physics,
            chemistry: scores.chemistry,
            biology: scores.biology,
            history: scores.history,
            geography: scores.geography,
            politics: scores.politics,
        }
    }

    /// The score recorded for `subject`, or `None` if it was not taken.
    pub fn score(&self, subject: Subject) -> Option<u32> {
        match subject {
            Subject::Chinese => self.chinese,
            Subject::Math => self.math,
            Subject::English => self.english,
            Subject::Physics => self.physics,
            Subject::Chemistry => self.chemistry,
            Subject::Biology => self.biology,
            Subject::History => self.history,
            Subject::Geography => self.geography,
            Subject::Politics => self.politics,
        }
    }

    /// Subjects that have a score, in field order.
    pub fn subjects_taken(&self) -> Vec<Subject> {
        Subject::ALL
            .into_iter()
            .filter(|s| self.score(*s).is_some())
            .collect()
    }

    /// Whether `total_score` matches the sum of the subject scores.
    pub fn is_consistent(&self) -> bool {
        let sum: u64 = Subject::ALL
            .iter()
            .filter_map(|s| self.score(*s))
            .map(u64::from)
            .sum();
        sum == u64::from(self.total_score)
    }

    /// The first subject whose score is above [`MAX_SUBJECT_SCORE`].
    pub fn out_of_range_subject(&self) -> Option<(Subject, u32)> {
        Subject::ALL
            .into_iter()
            .filter_map(|s| self.score(s).map(|v| (s, v)))
            .find(|(_, v)| *v > MAX_SUBJECT_SCORE)
    }
}

/// A named score threshold the user is aiming for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversityTarget {
    pub id: String,
    pub name: String,
    /// Total score needed to reach this goal.
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl UniversityTarget {
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Goals seeded the first time the goal list is read.
pub fn default_goals() -> Vec<UniversityTarget> {
    vec![
        UniversityTarget::new("g1", "Tsinghua University", 680).with_color("#ef4444"),
        UniversityTarget::new("g2", "Wuhan University", 610).with_color("#f59e0b"),
        UniversityTarget::new("g3", "Tier-1 Cutoff", 520).with_color(DEFAULT_GOAL_COLOR),
    ]
}

/// Sort goals descending by score. Equal scores keep their relative order.
pub fn sort_goals(goals: &mut [UniversityTarget]) {
    goals.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_display_and_parse() {
        assert_eq!(Subject::Math.to_string(), "math");
        assert_eq!("Physics".parse::<Subject>().unwrap(), Subject::Physics);
        assert_eq!(" politics ".parse::<Subject>().unwrap(), Subject::Politics);
        assert!("music".parse::<Subject>().is_err());
    }

    #[test]
    fn full_marks() {
        assert_eq!(Subject::Chinese.full_mark(), 150);
        assert_eq!(Subject::English.full_mark(), 150);
        assert_eq!(Subject::Biology.full_mark(), 100);
    }

    #[test]
    fn total_treats_missing_as_zero() {
        let scores = ScoresInput::default()
            .with(Subject::Math, 140)
            .with(Subject::English, 130);
        assert_eq!(scores.total(), 270);

        let record = ExamRecord::from_scores(1, "Record #1".into(), "2026-01-01".into(), &scores);
        assert_eq!(record.total_score, 270);
        assert_eq!(record.math, Some(140));
        assert_eq!(record.english, Some(130));
        for subject in [
            Subject::Chinese,
            Subject::Physics,
            Subject::Chemistry,
            Subject::Biology,
            Subject::History,
            Subject::Geography,
            Subject::Politics,
        ] {
            assert_eq!(record.score(subject), None, "{subject} should be absent");
        }
        assert!(record.is_consistent());
    }

    #[test]
    fn consistency_check_survives_huge_scores() {
        let mut record = ExamRecord::from_scores(
            1,
            "Record #1".into(),
            "2026-01-01".into(),
            &ScoresInput::default().with(Subject::Math, 1),
        );
        record.chinese = Some(u32::MAX);
        record.total_score = 0;
        assert!(!record.is_consistent());
        assert_eq!(record.out_of_range_subject(), Some((Subject::Chinese, u32::MAX)));

        record.chinese = Some(MAX_SUBJECT_SCORE);
        assert_eq!(record.out_of_range_subject(), None);
    }

    #[test]
    fn zero_is_kept_distinct_from_absent() {
        let scores = ScoresInput::default().with(Subject::Physics, 0);
        let record = ExamRecord::from_scores(1, "Record #1".into(), "2026-01-01".into(), &scores);
        assert_eq!(record.physics, Some(0));
        assert_eq!(record.total_score, 0);
        assert_eq!(record.subjects_taken(), vec![Subject::Physics]);
    }

    #[test]
    fn validate_rejects_four_digit_scores() {
        let scores = ScoresInput::default().with(Subject::Chinese, 1000);
        let err = scores.validate().unwrap_err();
        assert!(matches!(
            err,
            ScoreNoteError::InvalidScore {
                subject: Subject::Chinese,
                value: 1000,
                ..
            }
        ));
        assert!(ScoresInput::default().with(Subject::Chinese, 999).validate().is_ok());
    }

    #[test]
    fn record_serializes_absent_subjects_as_null() {
        let scores = ScoresInput::default().with(Subject::Math, 120);
        let record = ExamRecord::from_scores(7, "Record #1".into(), "2026-03-01".into(), &scores);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"id":7,"exam_name":"Record #1","exam_date":"2026-03-01","total_score":120,"chinese":null,"math":120"#));
        assert!(json.ends_with(r#""politics":null}"#));
    }

    #[test]
    fn goal_color_is_optional_in_json() {
        let goal: UniversityTarget =
            serde_json::from_str(r#"{"id":"x","name":"Local College","score":450}"#).unwrap();
        assert_eq!(goal.color, None);
        let json = serde_json::to_string(&goal).unwrap();
        assert!(!json.contains("color"));
    }

    #[test]
    fn sort_goals_descending_and_stable() {
        let mut goals = vec![
            UniversityTarget::new("a", "A", 520),
            UniversityTarget::new("b", "B", 680),
            UniversityTarget::new("c", "C", 520),
            UniversityTarget::new("d", "D", 610),
        ];
        sort_goals(&mut goals);
        let ids: Vec<&str> = goals.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }
}
