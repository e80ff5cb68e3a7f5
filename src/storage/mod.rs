//! Key-value persistence for tasks and timer settings.
//!
//! Values are JSON documents stored under string keys:
//!
//! | Key                  | Value                |
//! |----------------------|----------------------|
//! | `tasks`              | array of tasks       |
//! | `timerMode`          | `"pomodoro"`/`"custom"` |
//! | `customFocusMinutes` | integer              |
//! | `customBreakMinutes` | integer              |
//!
//! Reads go through [`load_or_default`] and writes through [`persist`]; both
//! log failures instead of returning them.

mod error;
mod file;
mod memory;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use error::{Result, StorageError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key for the task list.
pub const KEY_TASKS: &str = "tasks";
/// Key for the timer mode.
pub const KEY_TIMER_MODE: &str = "timerMode";
/// Key for the custom focus minutes.
pub const KEY_CUSTOM_FOCUS_MINUTES: &str = "customFocusMinutes";
/// Key for the custom break minutes.
pub const KEY_CUSTOM_BREAK_MINUTES: &str = "customBreakMinutes";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HNGOC_TIMER_DATA_DIR";

/// Directory name under the platform data directory.
const APP_DIR_NAME: &str = "hngoc-timer";

/// A string-keyed store of JSON values.
pub trait KeyValueStore {
    /// Reads the value for `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read or parsed.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Reads and decodes `key`, falling back to `default`.
///
/// Missing keys fall back quietly; read failures and malformed values are
/// logged first.
pub fn load_or_default<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let value = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using default");
            return default;
        }
    };

    match serde_json::from_value(value) {
        Ok(decoded) => decoded,
        Err(source) => {
            let e = StorageError::Malformed {
                key: key.to_string(),
                source,
            };
            tracing::warn!(key, error = %e, "stored value has unexpected shape, using default");
            default
        }
    }
}

/// Encodes and writes `value` under `key`.
///
/// Returns false after logging if the write failed.
pub fn persist<T, S>(store: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = match serde_json::to_value(value) {
        Ok(v) => v,
        Err(source) => {
            let e = StorageError::Serialize {
                key: key.to_string(),
                source,
            };
            tracing::error!(key, error = %e, "failed to encode value");
            return false;
        }
    };

    match store.set(key, encoded) {
        Ok(()) => {
            tracing::debug!(key, "persisted value");
            true
        }
        Err(e) => {
            tracing::error!(key, error = %e, "failed to persist value");
            false
        }
    }
}

/// Resolves the data directory.
///
/// Order: explicit path, `HNGOC_TIMER_DATA_DIR`, the platform data directory,
/// then the home directory.
///
/// # Errors
///
/// Returns [`StorageError::DataDirNotFound`] if none of them is available.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join(APP_DIR_NAME));
    }
    dirs::home_dir()
        .map(|home| home.join(format!(".{APP_DIR_NAME}")))
        .ok_or(StorageError::DataDirNotFound)
}

/// Opens the file store at `dir`.
///
/// Falls back to an in-memory store (nothing survives the process) when the
/// directory is unusable.
pub fn open_or_memory(dir: &Path) -> Box<dyn KeyValueStore> {
    match JsonFileStore::open(dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "data directory unavailable, changes will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}
