//! The `scorenote export` and `scorenote import` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use scorenote_core::backup::backup_file_name;

pub fn export(output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (config, book) = super::open(config_path)?;
    let path = output
        .unwrap_or_else(|| config.backup_dir.join(backup_file_name(Utc::now().date_naive())));

    let written = book.export_to_path(&path)?;
    let exams = book.exam_list()?.len();
    let goals = book.goals()?.len();
    println!(
        "Exported {exams} exam(s) and {goals} goal(s) to {}",
        written.display()
    );
    Ok(())
}

pub fn import(path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (_, book) = super::open(config_path)?;
    let summary = book
        .import_from_path(&path)
        .with_context(|| format!("import of {} failed, nothing was changed", path.display()))?;

    println!("Restore complete.");
    if let Some(exams) = summary.exams {
        println!("  {exams} exam(s) restored");
    }
    if let Some(goals) = summary.goals {
        println!("  {goals} goal(s) restored");
    }
    Ok(())
}
