//! The `scorenote target` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_, book) = super::open(config_path)?;
    let latest = book.latest_score()?;

    match book.current_target()? {
        Some(current) if current.is_passed => {
            println!(
                "Summit reached: {} ({} / {})",
                current.target.name, latest, current.target.score
            );
        }
        Some(current) => {
            println!(
                "Chasing: {} | {} points to go ({} / {})",
                current.target.name, current.gap, latest, current.target.score
            );
        }
        None => {
            println!("No goals set. Add one with `scorenote goals add --name <NAME> --score <N>`.");
        }
    }

    Ok(())
}
