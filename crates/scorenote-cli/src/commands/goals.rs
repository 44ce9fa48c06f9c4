//! The `scorenote goals` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::GoalAction;

pub fn execute(action: GoalAction, config_path: Option<PathBuf>) -> Result<()> {
    let (_, book) = super::open(config_path)?;

    match action {
        GoalAction::List => {
            let goals = book.goals()?;
            if goals.is_empty() {
                println!("No goals set.");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["ID", "Name", "Score", "Color"]);
            for goal in &goals {
                table.add_row(vec![
                    Cell::new(&goal.id),
                    Cell::new(&goal.name),
                    Cell::new(goal.score),
                    Cell::new(goal.color.as_deref().unwrap_or("-")),
                ]);
            }
            println!("{table}");
        }
        GoalAction::Add { name, score, color } => {
            let goal = book.add_goal(&name, score, color)?;
            println!("Added goal {} ({}) with id {}", goal.name, goal.score, goal.id);
        }
        GoalAction::Remove { id } => {
            let goal = book.remove_goal(&id)?;
            println!("Removed goal {} ({})", goal.name, goal.score);
        }
    }

    Ok(())
}
