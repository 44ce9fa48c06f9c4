//! Core trait definitions for storage backends.
//!
//! The data layer only ever talks to a [`KeyValueStore`]. Backends live in
//! [`crate::store`] (in-memory) and the `scorenote-store` crate (files).

use std::sync::Arc;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Key-value store trait
// ---------------------------------------------------------------------------

/// A string key-value store.
///
/// A single `set` or `remove` is atomic for its key. There are no
/// transactions spanning several keys.
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name (e.g. "memory", "file").
    fn name(&self) -> &str;

    /// Read the value stored under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Key holding the JSON array of exam records.
pub const EXAMS_KEY: &str = "scorenote_db_v3";

/// Key holding the JSON array of goals.
pub const GOALS_KEY: &str = "scorenote_goals_v3";
