//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, ScoreNoteError};
use crate::traits::KeyValueStore;

/// A [`KeyValueStore`] backed by a `HashMap`.
///
/// Used by tests and by the `memory` backend. [`MemoryStore::failing`]
/// builds a store whose writes always fail, standing in for a full or
/// unavailable disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that returns a storage error on every `set` and `remove`.
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            reject_writes: true,
        }
    }

    /// Seed a key directly, bypassing `reject_writes`.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(ScoreNoteError::storage(key, "quota exceeded"));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.reject_writes {
            return Err(ScoreNoteError::storage(key, "store is read-only"));
        }
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failing_store_rejects_writes_but_serves_seeded_reads() {
        let store = MemoryStore::failing().with_entry("k", "seed");
        assert!(store.set("k", "new").is_err());
        assert!(store.remove("k").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("seed"));
    }
}
