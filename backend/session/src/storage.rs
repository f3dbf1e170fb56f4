/// Durable per-user storage.
///
/// The caller loads this before dispatch and persists whatever comes back in
/// the turn outcome; the core never touches a backing store. Keys are opaque
/// strings chosen by handler authors, no schema is enforced here, and key
/// collisions across handlers are the caller's problem.
///
/// Writes are whole-value replacements. There is no read-modify-write
/// primitive, so a turn cancelled mid-flight leaves either the old value or
/// the new one, never a torn update. Concurrent requests racing on the same
/// user's storage are a documented hazard the caller must serialize around;
/// this type does no locking.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use voxhook_core::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserStorage {
    entries: HashMap<String, Value>,
}

impl UserStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Replace the value under `key` entirely.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Forget everything stored for this user.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, Value)> for UserStorage {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_whole_value() {
        let mut storage = UserStorage::new();
        storage.set("sum", 7.0);
        storage.set("sum", 12.0);
        assert_eq!(storage.get("sum").and_then(Value::as_num), Some(12.0));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut storage = UserStorage::new();
        storage.set("favoriteColor", "blue");
        storage.clear();
        assert!(storage.is_empty());
        assert!(storage.get("favoriteColor").is_none());
    }
}
