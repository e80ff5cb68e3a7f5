//! In-memory store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use serde_json::Value;

use super::error::{Result, StorageError};
use super::KeyValueStore;

/// HashMap-backed store. Can be told to fail every call.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    fail: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads and writes always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            values: HashMap::new(),
            fail: true,
        }
    }

    pub fn set_should_fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Raw access to a stored value.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn failure(key: &str) -> StorageError {
        StorageError::Io {
            path: PathBuf::from(key),
            source: io::Error::other("memory store configured to fail"),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.fail {
            return Err(Self::failure(key));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        if self.fail {
            return Err(Self::failure(key));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip() {
        let mut store = MemoryStore::new();
        store.set("timerMode", json!("custom")).unwrap();
        assert_eq!(store.get("timerMode").unwrap(), Some(json!("custom")));
        assert_eq!(store.raw("timerMode"), Some(&json!("custom")));
    }

    #[test]
    fn test_failing_store() {
        let mut store = MemoryStore::new();
        store.set_should_fail(true);
        assert!(store.get("tasks").is_err());
        assert!(store.set("tasks", json!([])).is_err());
    }
}
