//! The `scorenote init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("scorenote.toml").exists() {
        println!("scorenote.toml already exists, skipping.");
    } else {
        std::fs::write("scorenote.toml", SAMPLE_CONFIG)?;
        println!("Created scorenote.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit scorenote.toml to choose where data is kept");
    println!("  2. Run: scorenote add --chinese 120 --math 135 --english 128");
    println!("  3. Run: scorenote target");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# scorenote configuration

# Where `scorenote export` writes backups when no --output is given.
backup_dir = "."

[store]
type = "file"
path = "./scorenote-data"

[analysis]
# Gain (in points) that counts as a big leap.
big_leap_threshold = 20
"#;
