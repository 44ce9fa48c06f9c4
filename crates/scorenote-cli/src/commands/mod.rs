pub mod add;
pub mod backup;
pub mod clear;
pub mod curve;
pub mod goals;
pub mod init;
pub mod list;
pub mod target;

use std::path::PathBuf;

use anyhow::Result;

use scorenote_core::{KeyValueStore, ScoreBook};
use scorenote_store::{load_config_from, open_book, ScoreNoteConfig};

/// The score book every command works on.
pub type Book = ScoreBook<Box<dyn KeyValueStore>>;

/// Load the config and open the configured store.
pub fn open(config_path: Option<PathBuf>) -> Result<(ScoreNoteConfig, Book)> {
    let config = load_config_from(config_path.as_deref())?;
    let book = open_book(&config)?;
    tracing::debug!(store = book.repository().store().name(), "opened score book");
    Ok((config, book))
}
