//! Timer for Hngoc library
//!
//! This library provides the core functionality for the Timer for Hngoc CLI.
//! It includes:
//! - Session state machine for Pomodoro and custom focus/break timers
//! - Async timer engine with title publishing
//! - Persistent to-do list
//! - Key-value persistence adapter with file and in-memory stores
//! - Settings draft editing and time-of-day themes
//! - CLI command parsing, display utilities and the interactive session

pub mod app;
pub mod cli;
pub mod settings;
pub mod storage;
pub mod tasks;
pub mod theme;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use app::App;
pub use settings::SettingsDraft;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use tasks::TaskList;
pub use theme::Theme;
pub use timer::{
    MockTitleSink, NullTitleSink, TerminalTitleSink, TimerCommand, TimerEngine, TimerEvent,
    TitleSink,
};
pub use types::{
    duration, SessionType, Task, TickOutcome, TimerConfig, TimerMode, TimerState, Transition,
    TransitionCause,
};
