//! Draft editor for the custom focus/break durations.
//!
//! A [`SettingsDraft`] copies the current values, is adjusted one minute at a
//! time, and is either saved (both values at once) or discarded.

use crate::app::App;
use crate::storage::KeyValueStore;
use crate::types::TimerConfig;

/// Lowest value either duration can be adjusted to.
pub const MIN_MINUTES: u32 = 1;

/// Uncommitted custom durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsDraft {
    focus_minutes: u32,
    break_minutes: u32,
}

impl SettingsDraft {
    /// Seeds a draft from the current configuration.
    pub fn from_config(config: &TimerConfig) -> Self {
        Self {
            focus_minutes: config.custom_focus_minutes.max(MIN_MINUTES),
            break_minutes: config.custom_break_minutes.max(MIN_MINUTES),
        }
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn increment_focus(&mut self) {
        self.focus_minutes = self.focus_minutes.saturating_add(1);
    }

    pub fn decrement_focus(&mut self) {
        self.focus_minutes = self.focus_minutes.saturating_sub(1).max(MIN_MINUTES);
    }

    pub fn increment_break(&mut self) {
        self.break_minutes = self.break_minutes.saturating_add(1);
    }

    pub fn decrement_break(&mut self) {
        self.break_minutes = self.break_minutes.saturating_sub(1).max(MIN_MINUTES);
    }

    /// Sets the focus minutes directly, floored at [`MIN_MINUTES`].
    pub fn set_focus(&mut self, minutes: u32) {
        self.focus_minutes = minutes.max(MIN_MINUTES);
    }

    /// Sets the break minutes directly, floored at [`MIN_MINUTES`].
    pub fn set_break(&mut self, minutes: u32) {
        self.break_minutes = minutes.max(MIN_MINUTES);
    }

    /// Commits both values to `app` and returns the new configuration.
    pub fn save<S: KeyValueStore>(self, app: &mut App<S>) -> TimerConfig {
        app.save_custom_durations(self.focus_minutes, self.break_minutes)
    }

    /// Drops the draft without touching any persisted state.
    pub fn discard(self) {
        tracing::debug!("settings draft discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, KEY_CUSTOM_FOCUS_MINUTES};

    #[test]
    fn test_seeded_from_config() {
        let draft = SettingsDraft::from_config(&TimerConfig::default());
        assert_eq!(draft.focus_minutes(), 45);
        assert_eq!(draft.break_minutes(), 10);
    }

    #[test]
    fn test_adjust_by_one_minute() {
        let mut draft = SettingsDraft::from_config(&TimerConfig::default());
        draft.increment_focus();
        draft.increment_focus();
        draft.decrement_break();
        assert_eq!(draft.focus_minutes(), 47);
        assert_eq!(draft.break_minutes(), 9);
    }

    #[test]
    fn test_floor_of_one_minute() {
        let mut draft = SettingsDraft::from_config(&TimerConfig::default());
        for _ in 0..20 {
            draft.decrement_break();
        }
        assert_eq!(draft.break_minutes(), 1);

        draft.set_focus(0);
        assert_eq!(draft.focus_minutes(), 1);
    }

    #[test]
    fn test_no_ceiling() {
        let mut draft = SettingsDraft::from_config(&TimerConfig::default());
        draft.set_focus(600);
        draft.increment_focus();
        assert_eq!(draft.focus_minutes(), 601);
    }

    #[test]
    fn test_save_commits_both_values() {
        let mut app = App::load(MemoryStore::new());
        let mut draft = SettingsDraft::from_config(&app.config());
        draft.set_focus(30);
        draft.set_break(8);

        let config = draft.save(&mut app);
        assert_eq!(config.custom_focus_minutes, 30);
        assert_eq!(config.custom_break_minutes, 8);
        assert_eq!(app.config(), config);
    }

    #[test]
    fn test_discard_leaves_config_untouched() {
        let app = App::load(MemoryStore::new());
        let mut draft = SettingsDraft::from_config(&app.config());
        draft.set_focus(99);
        draft.discard();

        assert_eq!(app.config().custom_focus_minutes, 45);
        assert!(app.store().raw(KEY_CUSTOM_FOCUS_MINUTES).is_none());
    }
}
