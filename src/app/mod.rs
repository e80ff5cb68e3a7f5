//! Application state: task list and timer configuration backed by a store.
//!
//! [`App`] is the single owner of persisted state. Every mutation updates the
//! in-memory value first and then writes the affected key; storage failures
//! are logged and never surface to the caller.

use crate::storage::{
    load_or_default, persist, KeyValueStore, KEY_CUSTOM_BREAK_MINUTES, KEY_CUSTOM_FOCUS_MINUTES,
    KEY_TASKS, KEY_TIMER_MODE,
};
use crate::tasks::TaskList;
use crate::types::{Task, TimerConfig, TimerMode};

/// Persisted application state.
#[derive(Debug)]
pub struct App<S: KeyValueStore> {
    store: S,
    tasks: TaskList,
    config: TimerConfig,
}

impl<S: KeyValueStore> App<S> {
    /// Loads state from `store`, using defaults for anything missing or bad.
    pub fn load(store: S) -> Self {
        let defaults = TimerConfig::default();

        let tasks: Vec<Task> = load_or_default(&store, KEY_TASKS, Vec::new());
        let mode: TimerMode = load_or_default(&store, KEY_TIMER_MODE, defaults.mode);
        let focus: u32 = load_or_default(
            &store,
            KEY_CUSTOM_FOCUS_MINUTES,
            defaults.custom_focus_minutes,
        );
        let brk: u32 = load_or_default(
            &store,
            KEY_CUSTOM_BREAK_MINUTES,
            defaults.custom_break_minutes,
        );

        let config = defaults
            .with_mode(mode)
            .with_custom_focus_minutes(focus)
            .with_custom_break_minutes(brk);

        tracing::debug!(tasks = tasks.len(), mode = %config.mode, "loaded application state");

        Self {
            store,
            tasks: TaskList::from_tasks(tasks),
            config,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------------

    /// Re-reads the task list from the store.
    ///
    /// Another process may have written it since this one loaded. The
    /// in-memory list is kept when the stored one is missing or unreadable.
    pub fn reload_tasks(&mut self) {
        let value = match self.store.get(KEY_TASKS) {
            Ok(Some(value)) => value,
            Ok(None) => return,
            Err(e) => {
                tracing::debug!(error = %e, "could not re-read tasks, keeping current list");
                return;
            }
        };
        match serde_json::from_value::<Vec<Task>>(value) {
            Ok(tasks) => self.tasks = TaskList::from_tasks(tasks),
            Err(e) => tracing::debug!(error = %e, "stored tasks unreadable, keeping current list"),
        }
    }

    /// Adds a task. Returns its id, or `None` for blank text.
    pub fn add_task(&mut self, text: &str) -> Option<i64> {
        self.reload_tasks();
        let id = self.tasks.add(text)?;
        tracing::info!(id, "task added");
        self.save_tasks();
        Some(id)
    }

    /// Flips a task's completed flag. Returns false if the id is unknown.
    pub fn toggle_task(&mut self, id: i64) -> bool {
        self.reload_tasks();
        let found = self.tasks.toggle(id);
        if found {
            tracing::info!(id, "task toggled");
            self.save_tasks();
        }
        found
    }

    /// Deletes a task. Returns false if the id is unknown.
    pub fn delete_task(&mut self, id: i64) -> bool {
        self.reload_tasks();
        let found = self.tasks.delete(id);
        if found {
            tracing::info!(id, "task deleted");
            self.save_tasks();
        }
        found
    }

    fn save_tasks(&mut self) {
        persist(&mut self.store, KEY_TASKS, self.tasks.as_slice());
    }

    // ------------------------------------------------------------------------
    // Timer configuration
    // ------------------------------------------------------------------------

    /// Switches the timer mode. Returns the new configuration.
    pub fn set_mode(&mut self, mode: TimerMode) -> TimerConfig {
        self.config = self.config.with_mode(mode);
        tracing::info!(mode = %mode, "timer mode changed");
        persist(&mut self.store, KEY_TIMER_MODE, &mode);
        self.config
    }

    /// Saves both custom durations at once, flooring each at one minute.
    /// Returns the new configuration.
    pub fn save_custom_durations(&mut self, focus_minutes: u32, break_minutes: u32) -> TimerConfig {
        self.config = self
            .config
            .with_custom_focus_minutes(focus_minutes)
            .with_custom_break_minutes(break_minutes);
        tracing::info!(
            focus_minutes = self.config.custom_focus_minutes,
            break_minutes = self.config.custom_break_minutes,
            "custom durations saved"
        );
        persist(
            &mut self.store,
            KEY_CUSTOM_FOCUS_MINUTES,
            &self.config.custom_focus_minutes,
        );
        persist(
            &mut self.store,
            KEY_CUSTOM_BREAK_MINUTES,
            &self.config.custom_break_minutes,
        );
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_load_empty_store_uses_defaults() {
        let app = App::load(MemoryStore::new());
        assert!(app.tasks().is_empty());
        assert_eq!(app.config(), TimerConfig::default());
    }

    #[test]
    fn test_load_failing_store_uses_defaults() {
        let app = App::load(MemoryStore::failing());
        assert!(app.tasks().is_empty());
        assert_eq!(app.config(), TimerConfig::default());
    }

    #[test]
    fn test_load_malformed_values_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(KEY_TASKS, json!({ "not": "a list" })).unwrap();
        store.set(KEY_TIMER_MODE, json!("turbo")).unwrap();
        store.set(KEY_CUSTOM_FOCUS_MINUTES, json!(-5)).unwrap();

        let app = App::load(store);
        assert!(app.tasks().is_empty());
        assert_eq!(app.config(), TimerConfig::default());
    }

    #[test]
    fn test_load_clamps_zero_minutes() {
        let mut store = MemoryStore::new();
        store.set(KEY_CUSTOM_BREAK_MINUTES, json!(0)).unwrap();
        let app = App::load(store);
        assert_eq!(app.config().custom_break_minutes, 1);
    }

    #[test]
    fn test_add_task_persists_full_list() {
        let mut app = App::load(MemoryStore::new());
        let id = app.add_task("  write spec  ").unwrap();

        let stored = app.store().raw(KEY_TASKS).unwrap();
        assert_eq!(
            stored,
            &json!([{ "id": id, "text": "write spec", "completed": false }])
        );
    }

    #[test]
    fn test_add_blank_task_does_not_write() {
        let mut app = App::load(MemoryStore::new());
        assert_eq!(app.add_task("   "), None);
        assert!(app.store().raw(KEY_TASKS).is_none());
    }

    #[test]
    fn test_toggle_and_delete_persist() {
        let mut app = App::load(MemoryStore::new());
        let id = app.add_task("task").unwrap();

        assert!(app.toggle_task(id));
        assert_eq!(app.store().raw(KEY_TASKS).unwrap()[0]["completed"], json!(true));

        assert!(app.delete_task(id));
        assert_eq!(app.store().raw(KEY_TASKS).unwrap(), &json!([]));

        assert!(!app.delete_task(id));
        assert!(!app.toggle_task(id));
    }

    #[test]
    fn test_set_mode_persists() {
        let mut app = App::load(MemoryStore::new());
        let config = app.set_mode(TimerMode::Custom);
        assert_eq!(config.mode, TimerMode::Custom);
        assert_eq!(app.store().raw(KEY_TIMER_MODE), Some(&json!("custom")));
    }

    #[test]
    fn test_save_custom_durations_persists_both() {
        let mut app = App::load(MemoryStore::new());
        let config = app.save_custom_durations(50, 0);
        assert_eq!(config.custom_focus_minutes, 50);
        assert_eq!(config.custom_break_minutes, 1);
        assert_eq!(app.store().raw(KEY_CUSTOM_FOCUS_MINUTES), Some(&json!(50)));
        assert_eq!(app.store().raw(KEY_CUSTOM_BREAK_MINUTES), Some(&json!(1)));
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut store = MemoryStore::new();
        store.set_should_fail(true);
        let mut app = App::load(store);

        let id = app.add_task("still here").unwrap();
        assert!(app.tasks().get(id).is_some());
        assert_eq!(app.set_mode(TimerMode::Custom).mode, TimerMode::Custom);
    }

    #[test]
    fn test_state_survives_reload() {
        let mut app = App::load(MemoryStore::new());
        app.add_task("persisted");
        app.set_mode(TimerMode::Custom);
        app.save_custom_durations(30, 7);

        let reloaded = App::load(app.store().clone());
        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(
            reloaded.config(),
            TimerConfig {
                mode: TimerMode::Custom,
                custom_focus_minutes: 30,
                custom_break_minutes: 7,
            }
        );
    }
    #[test]
    fn test_mutations_keep_tasks_written_by_another_app() {
        let tmp = tempfile::tempdir().unwrap();
        let open = || crate::storage::JsonFileStore::open(tmp.path()).unwrap();
        let mut session = App::load(open());
        let mut other = App::load(open());

        let from_other = other.add_task("added from another terminal").unwrap();
        session.add_task("added in session").unwrap();

        let texts: Vec<String> = App::load(open())
            .tasks()
            .iter()
            .map(|t| t.text.clone())
            .collect();
        assert_eq!(texts, vec!["added from another terminal", "added in session"]);

        let from_session = session.tasks().as_slice()[1].id;
        other.delete_task(from_other);
        assert!(session.toggle_task(from_session));
        assert_eq!(session.tasks().len(), 1);
        assert!(session.tasks().as_slice()[0].completed);
    }

    #[test]
    fn test_reload_keeps_list_when_store_unreadable() {
        let mut app = App::load(MemoryStore::new());
        app.add_task("kept");
        app.store.set_should_fail(true);

        app.reload_tasks();
        assert_eq!(app.tasks().len(), 1);
    }
}
