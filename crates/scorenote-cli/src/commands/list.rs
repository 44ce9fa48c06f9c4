//! The `scorenote list` and `scorenote show` commands.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use scorenote_core::model::Subject;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_, book) = super::open(config_path)?;
    let exams = book.exam_list()?;

    if exams.is_empty() {
        println!("No exams recorded yet. Add one with `scorenote add --math 120 ...`.");
        return Ok(());
    }

    let mut header = vec!["ID", "Name", "Date", "Total"];
    header.extend(Subject::ALL.iter().map(|s| s.label()));

    let mut table = Table::new();
    table.set_header(header);

    for exam in &exams {
        let mut row = vec![
            Cell::new(exam.id),
            Cell::new(&exam.exam_name),
            Cell::new(&exam.exam_date),
            Cell::new(exam.total_score),
        ];
        row.extend(Subject::ALL.iter().map(|s| match exam.score(*s) {
            Some(score) => Cell::new(score),
            None => Cell::new("-"),
        }));
        table.add_row(row);
    }

    println!("{table}");
    println!("{} exam(s)", exams.len());
    Ok(())
}

pub fn show(id: i64, config_path: Option<PathBuf>) -> Result<()> {
    let (_, book) = super::open(config_path)?;
    let Some(exam) = book.exam_detail(id)? else {
        anyhow::bail!("no exam with id {id}");
    };

    println!("{} ({})", exam.exam_name, exam.exam_date);
    println!("Total score: {}", exam.total_score);

    let balance = scorenote_core::balance::subject_balance(&exam);
    if balance.is_empty() {
        println!("No subject scores recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Score", "Full mark", "Normalized (/150)"]);
    for point in &balance {
        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(point.original_score),
            Cell::new(point.full_mark),
            Cell::new(point.normalized_score),
        ]);
    }
    println!("{table}");
    Ok(())
}
