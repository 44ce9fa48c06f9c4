//! The `scorenote clear` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(reset_goals: bool, yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(
        yes,
        "this deletes every recorded exam and cannot be undone; re-run with --yes to confirm"
    );

    let (_, book) = super::open(config_path)?;
    book.clear_all_data()?;
    println!("All exam records deleted.");

    if reset_goals {
        book.reset_goals()?;
        println!("Goals reset to defaults.");
    }
    Ok(())
}
