//! Backup documents: export and import of both collections.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoreNoteError};
use crate::model::{ExamRecord, UniversityTarget, MAX_SUBJECT_SCORE};

/// Version tag written into every backup.
pub const APP_VERSION: &str = "3.0";

/// A full snapshot of records and goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub exams: Vec<ExamRecord>,
    pub goals: Vec<UniversityTarget>,
    /// When the backup was taken.
    pub date: DateTime<Utc>,
    #[serde(rename = "appVersion")]
    pub app_version: String,
}

impl BackupDocument {
    pub fn new(exams: Vec<ExamRecord>, goals: Vec<UniversityTarget>, date: DateTime<Utc>) -> Self {
        Self {
            exams,
            goals,
            date,
            app_version: APP_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScoreNoteError::MalformedBackup(format!("failed to serialize backup: {e}")))
    }
}

/// The parts of a backup that an import will apply.
///
/// Either collection may be missing from the document; a missing one is
/// left as it is in storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPlan {
    pub exams: Option<Vec<ExamRecord>>,
    pub goals: Option<Vec<UniversityTarget>>,
}

#[derive(Debug, Deserialize)]
struct RawBackup {
    #[serde(default)]
    exams: Option<Vec<ExamRecord>>,
    #[serde(default)]
    goals: Option<Vec<UniversityTarget>>,
}

/// Parse and validate a backup document without touching storage.
///
/// Fails on invalid JSON, a wrong shape, a record with a non-positive id or
/// a subject score above [`MAX_SUBJECT_SCORE`], a record whose total
/// disagrees with its subject scores, or a goal with an empty name.
pub fn parse_backup(content: &str) -> Result<ImportPlan> {
    let raw: RawBackup = serde_json::from_str(content)
        .map_err(|e| ScoreNoteError::MalformedBackup(e.to_string()))?;

    if let Some(exams) = &raw.exams {
        if let Some(bad) = exams.iter().find(|e| e.id <= 0) {
            return Err(ScoreNoteError::MalformedBackup(format!(
                "record '{}' has non-positive id {}",
                bad.exam_name, bad.id
            )));
        }
        for exam in exams {
            if let Some((subject, value)) = exam.out_of_range_subject() {
                return Err(ScoreNoteError::MalformedBackup(format!(
                    "record {} has {subject} score {value} above {MAX_SUBJECT_SCORE}",
                    exam.id
                )));
            }
        }
        if let Some(bad) = exams.iter().find(|e| !e.is_consistent()) {
            return Err(ScoreNoteError::MalformedBackup(format!(
                "record {} has total {} that does not match its subject scores",
                bad.id, bad.total_score
            )));
        }
    }

    if let Some(goals) = &raw.goals {
        if let Some(bad) = goals.iter().find(|g| g.name.trim().is_empty()) {
            return Err(ScoreNoteError::MalformedBackup(format!(
                "goal {} has an empty name",
                bad.id
            )));
        }
    }

    Ok(ImportPlan {
        exams: raw.exams,
        goals: raw.goals,
    })
}

/// Default file name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("ScoreNote_Backup_{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_goals, ScoresInput, Subject};

    fn sample_exams() -> Vec<ExamRecord> {
        vec![ExamRecord::from_scores(
            1_760_000_000_000,
            "Record #1".into(),
            "2026-01-01".into(),
            &ScoresInput::default()
                .with(Subject::Math, 140)
                .with(Subject::English, 130),
        )]
    }

    #[test]
    fn export_uses_camel_case_version_key() {
        let doc = BackupDocument::new(sample_exams(), default_goals(), Utc::now());
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"appVersion\": \"3.0\""));
        assert!(json.contains("\n  \"exams\": ["));
    }

    #[test]
    fn parse_accepts_exported_document() {
        let doc = BackupDocument::new(sample_exams(), default_goals(), Utc::now());
        let plan = parse_backup(&doc.to_json().unwrap()).unwrap();
        assert_eq!(plan.exams, Some(sample_exams()));
        assert_eq!(plan.goals, Some(default_goals()));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = parse_backup("{\"exams\": [").unwrap_err();
        assert!(matches!(err, ScoreNoteError::MalformedBackup(_)));
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        let err = parse_backup(r#"{"exams": "not a list"}"#).unwrap_err();
        assert!(matches!(err, ScoreNoteError::MalformedBackup(_)));
    }

    #[test]
    fn parse_rejects_inconsistent_total() {
        let json = r#"{"exams":[{"id":1,"exam_name":"Record #1","exam_date":"2026-01-01","total_score":999,
            "chinese":null,"math":100,"english":null,"physics":null,"chemistry":null,
            "biology":null,"history":null,"geography":null,"politics":null}]}"#;
        let err = parse_backup(json).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    fn record_json(id: i64, chinese: u64, math: u64, total: u64) -> String {
        format!(
            r#"{{"exams":[{{"id":{id},"exam_name":"Record #1","exam_date":"2026-01-01","total_score":{total},
            "chinese":{chinese},"math":{math},"english":null,"physics":null,"chemistry":null,
            "biology":null,"history":null,"geography":null,"politics":null}}]}}"#
        )
    }

    #[test]
    fn parse_rejects_score_above_subject_cap() {
        let err = parse_backup(&record_json(1, 1000, 100, 1100)).unwrap_err();
        assert!(matches!(err, ScoreNoteError::MalformedBackup(_)));
        assert!(err.to_string().contains("chinese score 1000"));

        let err = parse_backup(&record_json(1, 4_000_000_000, 0, 4_000_000_000)).unwrap_err();
        assert!(matches!(err, ScoreNoteError::MalformedBackup(_)));
    }

    #[test]
    fn parse_rejects_max_u32_score_without_panicking() {
        let err = parse_backup(&record_json(1, u32::MAX as u64, 1, 0)).unwrap_err();
        assert!(matches!(err, ScoreNoteError::MalformedBackup(_)));
    }

    #[test]
    fn parse_rejects_non_positive_ids() {
        for id in [0, -5] {
            let err = parse_backup(&record_json(id, 100, 100, 200)).unwrap_err();
            assert!(err.to_string().contains("non-positive id"));
        }
        assert!(parse_backup(&record_json(1, 999, 0, 999)).is_ok());
    }

    #[test]
    fn parse_allows_missing_collections() {
        let plan = parse_backup(r#"{"goals": []}"#).unwrap();
        assert_eq!(plan.exams, None);
        assert_eq!(plan.goals, Some(vec![]));
    }

    #[test]
    fn file_name_includes_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(backup_file_name(date), "ScoreNote_Backup_2026-10-18.json");
    }
}
