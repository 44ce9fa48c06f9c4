//! Configuration and store factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scorenote_core::analysis::AnalysisConfig;
use scorenote_core::store::MemoryStore;
use scorenote_core::traits::KeyValueStore;
use scorenote_core::ScoreBook;

use crate::file::FileStore;

/// Environment variable that forces a file store at the given directory.
pub const DATA_DIR_ENV: &str = "SCORENOTE_DATA_DIR";

/// Which storage backend to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// One JSON file per key under `path`.
    File {
        #[serde(default = "default_data_dir")]
        path: PathBuf,
    },
    /// Nothing survives the process. Useful for dry runs.
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("scorenote"),
        Err(_) => PathBuf::from(".scorenote"),
    }
}

/// Top-level scorenote configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreNoteConfig {
    /// Storage backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Analysis tunables.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Directory backups are exported to when no path is given.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ScoreNoteConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            analysis: AnalysisConfig::default(),
            backup_dir: default_backup_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` and a leading
/// `~` in a path.
fn resolve_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let mut result = String::with_capacity(raw.len());
    let mut rest: &str = &raw;
    // Substituted values are copied as-is and never rescanned.
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    if result == "~" || result.starts_with("~/") {
        if let Ok(home) = std::env::var("HOME") {
            result = format!("{home}{}", &result[1..]);
        }
    }
    PathBuf::from(result)
}

/// Apply the data-dir override and expand variables in configured paths.
fn finalize(mut config: ScoreNoteConfig, data_dir_override: Option<String>) -> ScoreNoteConfig {
    if let Some(dir) = data_dir_override.filter(|d| !d.trim().is_empty()) {
        config.store = StoreConfig::File {
            path: PathBuf::from(dir),
        };
    }
    if let StoreConfig::File { path } = &mut config.store {
        *path = resolve_path(path);
    }
    config.backup_dir = resolve_path(&config.backup_dir);
    config
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `scorenote.toml` in the current directory
/// 2. `~/.config/scorenote/config.toml`
///
/// `SCORENOTE_DATA_DIR` overrides the store with a file store at that path.
pub fn load_config() -> Result<ScoreNoteConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ScoreNoteConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("scorenote.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ScoreNoteConfig::default(),
    };

    Ok(finalize(config, std::env::var(DATA_DIR_ENV).ok()))
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<ScoreNoteConfig> {
    Ok(toml::from_str::<ScoreNoteConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("scorenote"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Box<dyn KeyValueStore>> {
    match config {
        StoreConfig::File { path } => Ok(Box::new(FileStore::open(path)?)),
        StoreConfig::Memory => {
            tracing::warn!("using in-memory store, nothing will be saved");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

/// Build a score book from a full configuration.
pub fn open_book(config: &ScoreNoteConfig) -> Result<ScoreBook<Box<dyn KeyValueStore>>> {
    let store = create_store(&config.store)?;
    Ok(ScoreBook::new(store).with_config(config.analysis.clone()))
}
