//! Error types for scorenote.
//!
//! Storage failures, corrupt stored data, rejected input, and failed imports
//! each get their own variant so front ends can decide how to surface them
//! without string matching.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Subject;

/// Errors produced by the scorenote data layer.
#[derive(Debug, Error)]
pub enum ScoreNoteError {
    /// The backing store rejected a read, write, or remove.
    #[error("storage error on key '{key}': {message}")]
    Storage { key: String, message: String },

    /// A stored value could not be decoded.
    #[error("stored data under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An entered subject score is out of range.
    #[error("invalid score for {subject}: {value} (must be at most {max})")]
    InvalidScore { subject: Subject, value: u32, max: u32 },

    /// A goal could not be created.
    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    /// No goal with the given id exists.
    #[error("goal not found: {0}")]
    GoalNotFound(String),

    /// A backup document failed to parse or validate. Nothing was written.
    #[error("malformed backup: {0}")]
    MalformedBackup(String),

    /// Reading or writing a backup file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScoreNoteError {
    /// Build a storage error for `key` from any displayable cause.
    pub fn storage(key: &str, cause: impl std::fmt::Display) -> Self {
        ScoreNoteError::Storage {
            key: key.to_string(),
            message: cause.to_string(),
        }
    }

    /// Returns `true` if the error was caused by the caller's input rather
    /// than by the storage backend.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ScoreNoteError::InvalidScore { .. }
                | ScoreNoteError::InvalidGoal(_)
                | ScoreNoteError::GoalNotFound(_)
                | ScoreNoteError::MalformedBackup(_)
        )
    }
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, ScoreNoteError>;
