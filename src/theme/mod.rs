//! Time-of-day theme selection.

use chrono::{Local, Timelike};

/// One of four themes chosen from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// 06:00 - 11:59
    Morning,
    /// 12:00 - 16:59
    Day,
    /// 17:00 - 20:59
    Evening,
    /// 21:00 - 05:59
    Night,
}

impl Theme {
    /// Picks the theme for an hour in `0..24`.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Theme::Morning,
            12..=16 => Theme::Day,
            17..=20 => Theme::Evening,
            _ => Theme::Night,
        }
    }

    /// Picks the theme for the current local time.
    pub fn current() -> Self {
        Self::from_hour(Local::now().hour())
    }

    /// Returns the theme tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Morning => "theme-morning",
            Theme::Day => "theme-day",
            Theme::Evening => "theme-evening",
            Theme::Night => "theme-night",
        }
    }

    /// Greeting shown in the session banner.
    pub fn greeting(&self) -> &'static str {
        match self {
            Theme::Morning => "Good morning",
            Theme::Day => "Good afternoon",
            Theme::Evening => "Good evening",
            Theme::Night => "Working late",
        }
    }
}
