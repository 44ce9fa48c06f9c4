//! Typed access to the two persisted collections.
//!
//! Records and goals are each stored as one JSON array under its own key.
//! Every save rewrites the whole array.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, ScoreNoteError};
use crate::model::{default_goals, sort_goals, ExamRecord, UniversityTarget};
use crate::traits::{KeyValueStore, EXAMS_KEY, GOALS_KEY};

/// Reads and writes exam records and goals through a [`KeyValueStore`].
pub struct ScoreRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records in insertion order. A missing key is an empty history.
    pub fn exams(&self) -> Result<Vec<ExamRecord>> {
        Ok(self.read_json(EXAMS_KEY)?.unwrap_or_default())
    }

    pub fn save_exams(&self, exams: &[ExamRecord]) -> Result<()> {
        self.write_json(EXAMS_KEY, exams)?;
        tracing::debug!(count = exams.len(), "saved exam records");
        Ok(())
    }

    /// The goal list, sorted descending by score.
    ///
    /// The first read on an empty store seeds and persists the default goals.
    pub fn goals(&self) -> Result<Vec<UniversityTarget>> {
        match self.read_json(GOALS_KEY)? {
            Some(goals) => Ok(goals),
            None => {
                let defaults = default_goals();
                self.write_json(GOALS_KEY, &defaults)?;
                tracing::info!("seeded {} default goals", defaults.len());
                Ok(defaults)
            }
        }
    }

    /// Sort `goals` descending by score and persist them. Returns the sorted list.
    pub fn save_goals(&self, mut goals: Vec<UniversityTarget>) -> Result<Vec<UniversityTarget>> {
        sort_goals(&mut goals);
        self.write_json(GOALS_KEY, &goals)?;
        tracing::debug!(count = goals.len(), "saved goals");
        Ok(goals)
    }

    /// Drop every record. Goals are kept.
    pub fn clear_exams(&self) -> Result<()> {
        self.store.remove(EXAMS_KEY)
    }

    /// Forget the goal list so the defaults are seeded again on next read.
    pub fn reset_goals(&self) -> Result<()> {
        self.store.remove(GOALS_KEY)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|source| {
            tracing::warn!("stored value under '{key}' is not valid: {source}");
            ScoreNoteError::Corrupt {
                key: key.to_string(),
                source,
            }
        })
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|e| ScoreNoteError::storage(key, e))?;
        self.store.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScoresInput, Subject};
    use crate::store::MemoryStore;

    fn record(id: i64, math: u32) -> ExamRecord {
        let scores = ScoresInput::default().with(Subject::Math, math);
        ExamRecord::from_scores(id, format!("Record #{id}"), "2026-05-01".into(), &scores)
    }

    #[test]
    fn empty_store_has_no_exams() {
        let repo = ScoreRepository::new(MemoryStore::new());
        assert!(repo.exams().unwrap().is_empty());
    }

    #[test]
    fn exams_round_trip_in_order() {
        let repo = ScoreRepository::new(MemoryStore::new());
        repo.save_exams(&[record(1, 100), record(2, 110)]).unwrap();
        let ids: Vec<i64> = repo.exams().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn first_goal_read_seeds_defaults() {
        let repo = ScoreRepository::new(MemoryStore::new());
        let goals = repo.goals().unwrap();
        let scores: Vec<u32> = goals.iter().map(|g| g.score).collect();
        assert_eq!(scores, vec![680, 610, 520]);
        assert!(repo.store().get(GOALS_KEY).unwrap().is_some());
    }

    #[test]
    fn stored_empty_goal_list_is_not_reseeded() {
        let repo = ScoreRepository::new(MemoryStore::new());
        repo.save_goals(vec![]).unwrap();
        assert!(repo.goals().unwrap().is_empty());
    }

    #[test]
    fn save_goals_sorts_descending() {
        let repo = ScoreRepository::new(MemoryStore::new());
        let saved = repo
            .save_goals(vec![
                UniversityTarget::new("a", "A", 500),
                UniversityTarget::new("b", "B", 650),
                UniversityTarget::new("c", "C", 580),
            ])
            .unwrap();
        let scores: Vec<u32> = saved.iter().map(|g| g.score).collect();
        assert_eq!(scores, vec![650, 580, 500]);
        assert_eq!(repo.goals().unwrap(), saved);
    }

    #[test]
    fn corrupt_value_reports_key() {
        let store = MemoryStore::new().with_entry(EXAMS_KEY, "{not json");
        let repo = ScoreRepository::new(store);
        let err = repo.exams().unwrap_err();
        assert!(matches!(err, ScoreNoteError::Corrupt { ref key, .. } if key == EXAMS_KEY));
    }

    #[test]
    fn clear_keeps_goals() {
        let repo = ScoreRepository::new(MemoryStore::new());
        repo.save_exams(&[record(1, 90)]).unwrap();
        repo.save_goals(vec![UniversityTarget::new("x", "X", 300)]).unwrap();
        repo.clear_exams().unwrap();
        assert!(repo.exams().unwrap().is_empty());
        assert_eq!(repo.goals().unwrap().len(), 1);
    }

    #[test]
    fn reset_goals_restores_defaults() {
        let repo = ScoreRepository::new(MemoryStore::new());
        repo.save_goals(vec![UniversityTarget::new("x", "X", 300)]).unwrap();
        repo.reset_goals().unwrap();
        assert_eq!(repo.goals().unwrap().len(), 3);
    }
}
