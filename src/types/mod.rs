//! Core data types for Timer for Hngoc.
//!
//! This module defines the data structures used for:
//! - Timer modes, session types and duration resolution
//! - Timer configuration (persisted) and timer state (transient)
//! - The session state machine (tick, completion, skip, reset, config change)
//! - To-do task entities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Focus duration in Pomodoro mode (minutes)
pub const POMODORO_FOCUS_MINUTES: u32 = 25;

/// Short break duration in Pomodoro mode (minutes)
pub const POMODORO_BREAK_MINUTES: u32 = 5;

/// Long break duration in Pomodoro mode (minutes)
pub const POMODORO_LONG_BREAK_MINUTES: u32 = 15;

/// Number of focus sessions before a long break
pub const POMODORO_CYCLES: u32 = 4;

/// Default custom focus duration (minutes)
pub const DEFAULT_CUSTOM_FOCUS_MINUTES: u32 = 45;

/// Default custom break duration (minutes)
pub const DEFAULT_CUSTOM_BREAK_MINUTES: u32 = 10;

/// Application name, used as the title suffix.
pub const APP_TITLE: &str = "Timer for Hngoc";

// ============================================================================
// TimerMode
// ============================================================================

/// Timer cadence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Fixed 25/5/15 minute cadence with a long break every 4 sessions
    #[default]
    Pomodoro,
    /// User-defined focus and break durations, no long break
    Custom,
}

impl TimerMode {
    /// Returns the persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "pomodoro",
            TimerMode::Custom => "custom",
        }
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Pomodoro",
            TimerMode::Custom => "Custom",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pomodoro" | "p" => Ok(TimerMode::Pomodoro),
            "custom" | "c" => Ok(TimerMode::Custom),
            other => Err(format!("unknown timer mode: {other}")),
        }
    }
}

// ============================================================================
// SessionType
// ============================================================================

/// Kind of the session currently counting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    /// Working interval
    #[default]
    Focus,
    /// Short rest after a focus session
    Break,
    /// Long rest after every fourth focus session (Pomodoro only)
    LongBreak,
}

impl SessionType {
    /// Returns the serialized string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Focus => "focus",
            SessionType::Break => "break",
            SessionType::LongBreak => "longBreak",
        }
    }

    /// Returns the label shown next to the clock.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Focus => "Focus",
            SessionType::Break => "Break",
            SessionType::LongBreak => "Long Break",
        }
    }

    /// Returns the label used in the window title.
    ///
    /// Long breaks are titled as plain breaks.
    pub fn title_label(&self) -> &'static str {
        match self {
            SessionType::Focus => "Focus",
            SessionType::Break | SessionType::LongBreak => "Break",
        }
    }

    /// Returns true for both break kinds.
    pub fn is_break(&self) -> bool {
        matches!(self, SessionType::Break | SessionType::LongBreak)
    }
}

// ============================================================================
// Duration resolution
// ============================================================================

/// Resolves the full length of a session in seconds.
///
/// In custom mode a long break lasts as long as a regular break.
pub fn duration(
    session_type: SessionType,
    mode: TimerMode,
    custom_focus_minutes: u32,
    custom_break_minutes: u32,
) -> u32 {
    let minutes = match mode {
        TimerMode::Pomodoro => match session_type {
            SessionType::Focus => POMODORO_FOCUS_MINUTES,
            SessionType::Break => POMODORO_BREAK_MINUTES,
            SessionType::LongBreak => POMODORO_LONG_BREAK_MINUTES,
        },
        TimerMode::Custom => match session_type {
            SessionType::Focus => custom_focus_minutes,
            SessionType::Break | SessionType::LongBreak => custom_break_minutes,
        },
    };
    minutes.saturating_mul(60)
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Persisted timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    /// Active cadence
    pub mode: TimerMode,
    /// Custom focus duration in minutes (at least 1)
    pub custom_focus_minutes: u32,
    /// Custom break duration in minutes (at least 1)
    pub custom_break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            mode: TimerMode::Pomodoro,
            custom_focus_minutes: DEFAULT_CUSTOM_FOCUS_MINUTES,
            custom_break_minutes: DEFAULT_CUSTOM_BREAK_MINUTES,
        }
    }
}

impl TimerConfig {
    /// Returns a copy with the given mode.
    pub fn with_mode(mut self, mode: TimerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy with the given custom focus minutes (floored at 1).
    pub fn with_custom_focus_minutes(mut self, minutes: u32) -> Self {
        self.custom_focus_minutes = minutes.max(1);
        self
    }

    /// Returns a copy with the given custom break minutes (floored at 1).
    pub fn with_custom_break_minutes(mut self, minutes: u32) -> Self {
        self.custom_break_minutes = minutes.max(1);
        self
    }

    /// Full length of `session_type` under this configuration, in seconds.
    pub fn duration(&self, session_type: SessionType) -> u32 {
        duration(
            session_type,
            self.mode,
            self.custom_focus_minutes,
            self.custom_break_minutes,
        )
    }
}

// ============================================================================
// Transitions
// ============================================================================

/// What caused a session change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    /// The countdown reached zero
    Completed,
    /// The user skipped the session
    Skipped,
}

/// Result of moving from one session to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Session that ended
    pub from: SessionType,
    /// Session that was loaded
    pub to: SessionType,
    /// Cycle count after the transition
    pub cycle: u32,
    /// Completion or skip
    pub cause: TransitionCause,
}

/// Result of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is paused; nothing changed
    Idle,
    /// One second was counted down
    Counted {
        /// Remaining seconds after the tick
        seconds_left: u32,
    },
    /// The countdown reached zero and the next session was loaded
    Completed(Transition),
}

// ============================================================================
// TimerState
// ============================================================================

/// Transient countdown state.
///
/// Every transition is total and only touches this struct; persisting and
/// publishing the title are left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Remaining seconds in the current session
    pub seconds_left: u32,
    /// Whether the countdown is running
    pub is_active: bool,
    /// Current session
    pub session_type: SessionType,
    /// Focus sessions completed since the last long break
    pub cycle: u32,
}

impl TimerState {
    /// Creates a fresh, paused focus session.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            seconds_left: config.duration(SessionType::Focus),
            is_active: false,
            session_type: SessionType::Focus,
            cycle: 0,
        }
    }

    /// Flips between running and paused. Returns the new running flag.
    ///
    /// Does nothing once the countdown has hit zero; the next tick completes
    /// the session instead.
    pub fn toggle(&mut self) -> bool {
        if self.seconds_left > 0 {
            self.is_active = !self.is_active;
        }
        self.is_active
    }

    /// Advances the countdown by one second.
    ///
    /// Reaching zero while running completes the session in the same step.
    pub fn tick(&mut self, config: &TimerConfig) -> TickOutcome {
        if !self.is_active {
            return TickOutcome::Idle;
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);

        if self.seconds_left == 0 {
            TickOutcome::Completed(self.complete(config))
        } else {
            TickOutcome::Counted {
                seconds_left: self.seconds_left,
            }
        }
    }

    /// Ends the current session because its countdown ran out.
    pub fn complete(&mut self, config: &TimerConfig) -> Transition {
        self.advance(config, TransitionCause::Completed)
    }

    /// Ends the current session on request. Valid while paused.
    pub fn skip(&mut self, config: &TimerConfig) -> Transition {
        self.advance(config, TransitionCause::Skipped)
    }

    /// Reloads the full duration of the current session and pauses.
    pub fn reset(&mut self, config: &TimerConfig) {
        self.seconds_left = config.duration(self.session_type);
        self.is_active = false;
    }

    /// Re-derives the remaining time after a mode or duration change.
    ///
    /// The session type is kept. The cycle is kept within Pomodoro mode and
    /// cleared when switching to custom mode, which has no long break.
    pub fn apply_config(&mut self, config: &TimerConfig) {
        self.reset(config);
        if config.mode == TimerMode::Custom {
            self.cycle = 0;
        }
    }

    fn advance(&mut self, config: &TimerConfig, cause: TransitionCause) -> Transition {
        let from = self.session_type;

        let to = match from {
            SessionType::Focus => match config.mode {
                TimerMode::Pomodoro => {
                    self.cycle += 1;
                    if self.cycle % POMODORO_CYCLES == 0 {
                        SessionType::LongBreak
                    } else {
                        SessionType::Break
                    }
                }
                // No long-break milestone in custom mode
                TimerMode::Custom => {
                    self.cycle = 0;
                    SessionType::Break
                }
            },
            SessionType::Break | SessionType::LongBreak => {
                if from == SessionType::LongBreak && config.mode == TimerMode::Pomodoro {
                    self.cycle = 0;
                }
                SessionType::Focus
            }
        };

        self.session_type = to;
        self.seconds_left = config.duration(to);
        self.is_active = false;

        Transition {
            from,
            to,
            cycle: self.cycle,
            cause,
        }
    }

    /// Whole minutes left.
    pub fn minutes(&self) -> u32 {
        self.seconds_left / 60
    }

    /// Seconds left within the current minute.
    pub fn seconds(&self) -> u32 {
        self.seconds_left % 60
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.minutes(), self.seconds())
    }

    /// Window title, e.g. `25:00 - Focus | Timer for Hngoc`.
    pub fn title(&self) -> String {
        format!(
            "{} - {} | {}",
            self.clock(),
            self.session_type.title_label(),
            APP_TITLE
        )
    }
}

// ============================================================================
// Task
// ============================================================================

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation timestamp in milliseconds, unique within a list
    pub id: i64,
    /// Trimmed, non-empty text
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
}

// ============================================================================
// Tests
// ============================================================================
