//! The score book: the operations front ends call.
//!
//! Ties the repository, the analysis functions, curves, and backups
//! together. Every operation reads the current collections from the store,
//! so nothing is cached between calls.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{
    analyze_goals, calculate_current_target, latest_score, AnalysisConfig, CurrentTarget,
    GoalAnalysis, Trend,
};
use crate::backup::{parse_backup, BackupDocument};
use crate::balance::{subject_balance, SubjectPoint};
use crate::curve::{subject_curve, total_curve, CurveData};
use crate::error::{Result, ScoreNoteError};
use crate::model::{ExamRecord, ScoresInput, Subject, UniversityTarget, DEFAULT_GOAL_COLOR};
use crate::repository::ScoreRepository;
use crate::traits::{KeyValueStore, EXAMS_KEY};

/// Source of the current time, swappable in tests.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result of recording a new exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddExamResponse {
    pub status: String,
    pub total_score: u32,
    /// Signed change from the previous record, `None` for the first one.
    pub diff_from_last: Option<i64>,
    pub is_improved: bool,
    pub trend_message: String,
    pub analysis_result: GoalAnalysis,
    /// The record that was stored.
    pub record: ExamRecord,
}

/// Summary of an applied import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records now stored, if the backup carried records.
    pub exams: Option<usize>,
    /// Goals now stored, if the backup carried goals.
    pub goals: Option<usize>,
}

/// Exam history and goals over a [`KeyValueStore`].
pub struct ScoreBook<S> {
    repo: ScoreRepository<S>,
    config: AnalysisConfig,
    clock: Clock,
}

impl<S: KeyValueStore> ScoreBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            repo: ScoreRepository::new(store),
            config: AnalysisConfig::default(),
            clock: Box::new(Utc::now),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn repository(&self) -> &ScoreRepository<S> {
        &self.repo
    }

    // -- records ----------------------------------------------------------

    /// Validate `scores`, append a new record, and analyse it against the
    /// previous record and the goal list.
    pub fn add_exam(&self, scores: &ScoresInput) -> Result<AddExamResponse> {
        scores.validate()?;

        let mut exams = self.repo.exams()?;
        let goals = self.repo.goals()?;
        let now = (self.clock)();

        let record = ExamRecord::from_scores(
            next_record_id(now.timestamp_millis(), exams.last())?,
            format!("Record #{}", exams.len() + 1),
            now.format("%Y-%m-%d").to_string(),
            scores,
        );
        let total = record.total_score;
        let trend = Trend::between(exams.last().map(|e| e.total_score), total, &self.config);
        let analysis = analyze_goals(total, &goals);

        exams.push(record.clone());
        if let Err(e) = self.repo.save_exams(&exams) {
            tracing::error!("failed to store new record: {e}");
            return Err(e);
        }
        tracing::info!(id = record.id, total, "recorded {}", record.exam_name);

        Ok(AddExamResponse {
            status: "ok".to_string(),
            total_score: total,
            diff_from_last: trend.delta(),
            is_improved: trend.is_improved(),
            trend_message: trend.message(),
            analysis_result: analysis,
            record,
        })
    }

    /// Every record in insertion order.
    pub fn exam_list(&self) -> Result<Vec<ExamRecord>> {
        self.repo.exams()
    }

    pub fn exam_detail(&self, id: i64) -> Result<Option<ExamRecord>> {
        Ok(self.repo.exams()?.into_iter().find(|e| e.id == id))
    }

    /// Normalized subject scores of record `id`, or `None` if it does not exist.
    pub fn subject_balance(&self, id: i64) -> Result<Option<Vec<SubjectPoint>>> {
        Ok(self.exam_detail(id)?.as_ref().map(subject_balance))
    }

    pub fn latest_score(&self) -> Result<u32> {
        Ok(latest_score(&self.repo.exams()?))
    }

    /// The goal to chase given the latest total. `None` when no goals are set.
    pub fn current_target(&self) -> Result<Option<CurrentTarget>> {
        let score = self.latest_score()?;
        Ok(calculate_current_target(score, &self.repo.goals()?))
    }

    pub fn total_curve(&self) -> Result<CurveData> {
        Ok(total_curve(&self.repo.exams()?, &self.repo.goals()?))
    }

    pub fn subject_curve(&self, subject: Subject) -> Result<CurveData> {
        Ok(subject_curve(&self.repo.exams()?, subject))
    }

    /// Drop every record. Goals are kept.
    pub fn clear_all_data(&self) -> Result<()> {
        self.repo.clear_exams()?;
        tracing::info!("cleared all exam records");
        Ok(())
    }

    // -- goals ------------------------------------------------------------

    /// Goals, highest threshold first.
    pub fn goals(&self) -> Result<Vec<UniversityTarget>> {
        self.repo.goals()
    }

    /// Replace the goal list. The stored list is sorted descending.
    pub fn save_goals(&self, goals: Vec<UniversityTarget>) -> Result<Vec<UniversityTarget>> {
        self.repo.save_goals(goals)
    }

    /// Add a goal with a fresh id. Returns the created goal.
    pub fn add_goal(
        &self,
        name: &str,
        score: u32,
        color: Option<String>,
    ) -> Result<UniversityTarget> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreNoteError::InvalidGoal("name must not be empty".into()));
        }

        let goal = UniversityTarget::new(Uuid::new_v4().to_string(), name, score)
            .with_color(color.unwrap_or_else(|| DEFAULT_GOAL_COLOR.to_string()));

        let mut goals = self.repo.goals()?;
        goals.push(goal.clone());
        self.repo.save_goals(goals)?;
        tracing::info!(id = %goal.id, score, "added goal {}", goal.name);
        Ok(goal)
    }

    /// Remove the goal with `id`. Returns the removed goal.
    pub fn remove_goal(&self, id: &str) -> Result<UniversityTarget> {
        let mut goals = self.repo.goals()?;
        let index = goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| ScoreNoteError::GoalNotFound(id.to_string()))?;
        let removed = goals.remove(index);
        self.repo.save_goals(goals)?;
        tracing::info!(id, "removed goal {}", removed.name);
        Ok(removed)
    }

    /// Forget the goal list; the defaults come back on next read.
    pub fn reset_goals(&self) -> Result<()> {
        self.repo.reset_goals()?;
        tracing::info!("reset goals to defaults");
        Ok(())
    }

    // -- backup -----------------------------------------------------------

    /// Snapshot both collections.
    pub fn export_backup(&self) -> Result<BackupDocument> {
        Ok(BackupDocument::new(
            self.repo.exams()?,
            self.repo.goals()?,
            (self.clock)(),
        ))
    }

    /// Write a backup to `path`, creating parent directories.
    pub fn export_to_path(&self, path: &Path) -> Result<PathBuf> {
        let json = self.export_backup()?.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ScoreNoteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| ScoreNoteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("exported backup to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Replace the stored collections with those in `content`.
    ///
    /// The whole document is parsed and validated first; on any failure
    /// nothing is written. If writing the goals fails after the records were
    /// replaced, the previous records are put back.
    pub fn import_backup(&self, content: &str) -> Result<ImportSummary> {
        let plan = match parse_backup(content) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!("rejected backup: {e}");
                return Err(e);
            }
        };

        let previous_exams = self.repo.store().get(EXAMS_KEY)?;

        if let Some(exams) = &plan.exams {
            self.repo.save_exams(exams)?;
        }

        let goals_written = match plan.goals {
            Some(goals) => match self.repo.save_goals(goals) {
                Ok(saved) => Some(saved.len()),
                Err(e) => {
                    if plan.exams.is_some() {
                        self.restore_exams(previous_exams.as_deref());
                    }
                    return Err(e);
                }
            },
            None => None,
        };

        let summary = ImportSummary {
            exams: plan.exams.as_ref().map(Vec::len),
            goals: goals_written,
        };
        tracing::info!(?summary, "imported backup");
        Ok(summary)
    }

    /// Read a backup file and import it.
    pub fn import_from_path(&self, path: &Path) -> Result<ImportSummary> {
        let content = std::fs::read_to_string(path).map_err(|source| ScoreNoteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_backup(&content)
    }

    fn restore_exams(&self, previous: Option<&str>) {
        let store = self.repo.store();
        let restored = match previous {
            Some(raw) => store.set(EXAMS_KEY, raw),
            None => store.remove(EXAMS_KEY),
        };
        if let Err(e) = restored {
            tracing::error!("failed to restore records after aborted import: {e}");
        }
    }
}

/// Millisecond id for a new record, strictly greater than the last one.
fn next_record_id(now_ms: i64, last: Option<&ExamRecord>) -> Result<i64> {
    match last {
        Some(last) if now_ms <= last.id => last.id.checked_add(1).ok_or_else(|| {
            ScoreNoteError::storage(EXAMS_KEY, format!("no record id left after {}", last.id))
        }),
        _ => Ok(now_ms),
    }
}
