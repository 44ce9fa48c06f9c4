//! The `scorenote curve` command.

use std::path::PathBuf;

use anyhow::Result;

use scorenote_core::model::Subject;

pub fn execute(subject: Option<String>, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let subject = subject
        .map(|s| s.parse::<Subject>().map_err(|e| anyhow::anyhow!("{e}")))
        .transpose()?;

    let (_, book) = super::open(config_path)?;
    let curve = match subject {
        Some(subject) => book.subject_curve(subject)?,
        None => book.total_curve()?,
    };

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&curve)?);
        }
        _ => {
            let title = subject.map(|s| s.label()).unwrap_or("Total");
            println!("{title} curve ({} points)", curve.len());
            for (label, score) in curve.points() {
                match score {
                    Some(score) => println!("  {label}\t{score}"),
                    None => println!("  {label}\t-"),
                }
            }
            if let Some(goals) = &curve.goals {
                for goal in goals {
                    println!("  goal: {} = {}", goal.name, goal.score);
                }
            }
        }
    }

    Ok(())
}
