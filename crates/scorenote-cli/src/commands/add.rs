//! The `scorenote add` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use scorenote_core::model::{ScoresInput, Subject};

/// One optional flag per subject.
#[derive(Args, Debug, Default)]
pub struct ScoreArgs {
    #[arg(long)]
    pub chinese: Option<u32>,
    #[arg(long)]
    pub math: Option<u32>,
    #[arg(long)]
    pub english: Option<u32>,
    #[arg(long)]
    pub physics: Option<u32>,
    #[arg(long)]
    pub chemistry: Option<u32>,
    #[arg(long)]
    pub biology: Option<u32>,
    #[arg(long)]
    pub history: Option<u32>,
    #[arg(long)]
    pub geography: Option<u32>,
    #[arg(long)]
    pub politics: Option<u32>,
}

impl From<ScoreArgs> for ScoresInput {
    fn from(args: ScoreArgs) -> Self {
        ScoresInput {
            chinese: args.chinese,
            math: args.math,
            english: args.english,
            physics: args.physics,
            chemistry: args.chemistry,
            biology: args.biology,
            history: args.history,
            geography: args.geography,
            politics: args.politics,
        }
    }
}

pub fn execute(scores: ScoreArgs, config_path: Option<PathBuf>) -> Result<()> {
    let scores = ScoresInput::from(scores);
    if scores.is_empty() {
        tracing::warn!("no subject scores given, recording a total of 0");
    }

    let (_, book) = super::open(config_path)?;
    let response = book.add_exam(&scores)?;

    println!(
        "Saved {} ({})",
        response.record.exam_name, response.record.exam_date
    );
    println!("Total score: {}", response.total_score);
    for subject in Subject::ALL {
        if let Some(score) = response.record.score(subject) {
            println!("  {:<10} {score}", subject.label());
        }
    }
    match response.diff_from_last {
        Some(diff) => println!("Change: {diff:+}"),
        None => println!("Change: first record"),
    }
    println!("{}", response.trend_message);

    let analysis = &response.analysis_result;
    for goal in &analysis.reached_goals {
        println!("Reached: {goal}");
    }
    if let Some(next) = &analysis.next_goal {
        println!("Next goal: {} ({} points to go)", next.name, next.gap);
    }
    println!("\n{}", analysis.comment);

    Ok(())
}
