//! File-backed key-value store.
//!
//! Each key is a `<key>.json` file under a data directory. Writes go to a
//! temporary file in the same directory that is then renamed over the
//! target, so a crash mid-write never leaves a half-written value.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use scorenote_core::error::ScoreNoteError;
use scorenote_core::traits::KeyValueStore;

/// A [`KeyValueStore`] keeping one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("failed to create data directory: {}", root.display()))?;
        tracing::debug!("opened file store at {}", root.display());
        Ok(Self { root })
    }

    /// The data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn checked_path(&self, key: &str) -> scorenote_core::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ScoreNoteError::storage(key, "invalid key"));
        }
        Ok(self.path_for(key))
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> scorenote_core::Result<Option<String>> {
        let path = self.checked_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScoreNoteError::storage(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> scorenote_core::Result<()> {
        let path = self.checked_path(key)?;
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(|e| ScoreNoteError::storage(key, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| ScoreNoteError::storage(key, e))?;
        tmp.persist(&path)
            .map_err(|e| ScoreNoteError::storage(key, e.error))?;
        tracing::debug!(bytes = value.len(), "wrote {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> scorenote_core::Result<()> {
        let path = self.checked_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScoreNoteError::storage(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorenote_core::model::{ScoresInput, Subject};
    use scorenote_core::traits::EXAMS_KEY;
    use scorenote_core::ScoreBook;

    #[test]
    fn open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let store = FileStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("alpha").unwrap(), None);
        store.set("alpha", "[1,2]").unwrap();
        store.set("alpha", "[3]").unwrap();
        assert_eq!(store.get("alpha").unwrap().as_deref(), Some("[3]"));
        assert!(dir.path().join("alpha.json").exists());

        store.remove("alpha").unwrap();
        store.remove("alpha").unwrap();
        assert_eq!(store.get("alpha").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("alpha", "1").unwrap();
        store.set("beta", "2").unwrap();
        let count = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn score_book_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let book = ScoreBook::new(FileStore::open(dir.path()).unwrap());
            book.add_exam(&ScoresInput::default().with(Subject::Math, 140))
                .unwrap();
        }
        let book = ScoreBook::new(FileStore::open(dir.path()).unwrap());
        let exams = book.exam_list().unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].math, Some(140));

        let raw = std::fs::read_to_string(dir.path().join(format!("{EXAMS_KEY}.json"))).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.is_array());
    }
}
