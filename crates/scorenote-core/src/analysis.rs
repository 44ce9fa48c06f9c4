//! Trend and goal analysis.
//!
//! Everything here is a pure function over a total score, the previous
//! record, and the goal list. The goal list is expected to be sorted
//! descending by score, but each function sorts its own copy so callers
//! holding an unsorted list still get the documented answer.

use serde::{Deserialize, Serialize};

use crate::model::{sort_goals, ExamRecord, UniversityTarget};

/// Tunables for the analysis messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Improvement (in points) at or above which a gain counts as a big leap.
    #[serde(default = "default_big_leap_threshold")]
    pub big_leap_threshold: i64,
}

fn default_big_leap_threshold() -> i64 {
    20
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            big_leap_threshold: default_big_leap_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trend between consecutive records
// ---------------------------------------------------------------------------

/// How a new total compares with the previous record's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trend {
    /// There was no previous record.
    FirstRecord,
    /// Improved by at least the big-leap threshold.
    BigLeap { delta: i64 },
    /// Improved, but by less than the threshold.
    Improved { delta: i64 },
    /// Same total as last time.
    Unchanged,
    /// Lower than last time. `delta` is negative.
    Declined { delta: i64 },
}

impl Trend {
    /// Classify `current` against `previous`.
    pub fn between(previous: Option<u32>, current: u32, config: &AnalysisConfig) -> Self {
        let Some(previous) = previous else {
            return Trend::FirstRecord;
        };
        let delta = i64::from(current) - i64::from(previous);
        if delta >= config.big_leap_threshold && delta > 0 {
            Trend::BigLeap { delta }
        } else if delta > 0 {
            Trend::Improved { delta }
        } else if delta == 0 {
            Trend::Unchanged
        } else {
            Trend::Declined { delta }
        }
    }

    /// Signed change from the previous record, `None` for the first one.
    pub fn delta(&self) -> Option<i64> {
        match *self {
            Trend::FirstRecord => None,
            Trend::Unchanged => Some(0),
            Trend::BigLeap { delta } | Trend::Improved { delta } | Trend::Declined { delta } => {
                Some(delta)
            }
        }
    }

    pub fn is_improved(&self) -> bool {
        matches!(self, Trend::BigLeap { .. } | Trend::Improved { .. })
    }

    /// The canned encouragement or caution for this trend.
    pub fn message(&self) -> String {
        match *self {
            Trend::FirstRecord => {
                "First score recorded. Every journey starts with a single step.".to_string()
            }
            Trend::BigLeap { delta } => {
                format!("Huge progress! Up {delta} points on last time, treat yourself.")
            }
            Trend::Improved { delta } => {
                format!("Nice momentum! {delta} points higher than last time.")
            }
            Trend::Unchanged => "Same total as last time. Hold the line and push on.".to_string(),
            Trend::Declined { delta } => format!(
                "Down {} points from last time. Regroup and win it back next time.",
                delta.unsigned_abs()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Goal analysis
// ---------------------------------------------------------------------------

/// The closest goal not yet reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextGoal {
    pub name: String,
    /// Points still missing.
    pub gap: u32,
}

/// Which goals a total reaches, and what comes next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalAnalysis {
    /// Names of reached goals, highest threshold first.
    pub reached_goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_goal: Option<NextGoal>,
    pub comment: String,
}

/// Partition `goals` into reached (`total >= score`) and not reached, and
/// report the unreached goal with the lowest threshold.
pub fn analyze_goals(total: u32, goals: &[UniversityTarget]) -> GoalAnalysis {
    let mut sorted = goals.to_vec();
    sort_goals(&mut sorted);

    let reached_goals: Vec<String> = sorted
        .iter()
        .filter(|g| total >= g.score)
        .map(|g| g.name.clone())
        .collect();

    // Descending order, so the last unreached goal is the nearest one.
    let next_goal = sorted
        .iter()
        .filter(|g| total < g.score)
        .next_back()
        .map(|g| NextGoal {
            name: g.name.clone(),
            gap: g.score - total,
        });

    let comment = match (reached_goals.first(), &next_goal) {
        (Some(highest), Some(next)) => format!(
            "Great work! You are safely past [{highest}]. Only {} points to the next level [{}], a few more right answers and you are there!",
            next.gap, next.name
        ),
        (Some(highest), None) => format!(
            "Great work! You are safely past [{highest}]. You have beaten every goal you set!"
        ),
        (None, Some(next)) => format!(
            "Don't lose heart: {} points to the base goal [{}]. Shore up the fundamentals first.",
            next.gap, next.name
        ),
        (None, None) => {
            "Record saved. Add a few target universities to track your progress.".to_string()
        }
    };

    GoalAnalysis {
        reached_goals,
        next_goal,
        comment,
    }
}

/// The goal to chase right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTarget {
    pub target: UniversityTarget,
    /// Points missing, zero once every goal is passed.
    pub gap: u32,
    pub is_passed: bool,
}

/// Pick the lowest goal whose threshold is above `score`.
///
/// When `score` meets or exceeds every threshold, the highest goal is
/// returned with `is_passed = true` and a zero gap. Returns `None` when
/// there are no goals.
pub fn calculate_current_target(score: u32, goals: &[UniversityTarget]) -> Option<CurrentTarget> {
    let mut sorted = goals.to_vec();
    sort_goals(&mut sorted);
    let highest = sorted.first()?.clone();

    match sorted.iter().rev().find(|g| g.score > score) {
        Some(next) => Some(CurrentTarget {
            gap: next.score - score,
            target: next.clone(),
            is_passed: false,
        }),
        None => Some(CurrentTarget {
            target: highest,
            gap: 0,
            is_passed: true,
        }),
    }
}

/// Total of the most recent record, or 0 with no history.
pub fn latest_score(records: &[ExamRecord]) -> u32 {
    records.last().map(|r| r.total_score).unwrap_or(0)
}
