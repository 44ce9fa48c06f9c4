//! scorenote-store: Storage backends and configuration.
//!
//! Implements the `KeyValueStore` trait on top of the filesystem and loads
//! the TOML configuration that picks a backend.

pub mod config;
pub mod file;

pub use config::{
    create_store, load_config, load_config_from, open_book, ScoreNoteConfig, StoreConfig,
};
pub use file::FileStore;
