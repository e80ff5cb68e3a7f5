//! Display utilities for the Timer for Hngoc CLI.
//!
//! This module provides formatted output for:
//! - Task list commands
//! - Mode and settings changes
//! - Status display
//! - The interactive timer session

use std::io::{self, Write};

use crate::tasks::TaskList;
use crate::theme::Theme;
use crate::timer::TimerEvent;
use crate::types::{Task, TimerConfig, TimerMode, TimerState, TransitionCause, POMODORO_CYCLES};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    // ------------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------------

    /// Shows a newly added task.
    pub fn show_task_added(task: &Task) {
        println!("+ Added task {}", task.id);
        println!("  {}", task.text);
    }

    /// Shows a task after its completed flag changed.
    pub fn show_task_toggled(task: &Task) {
        if task.completed {
            println!("* Completed: {}", task.text);
        } else {
            println!("o Reopened: {}", task.text);
        }
    }

    /// Shows a deleted task id.
    pub fn show_task_deleted(id: i64) {
        println!("- Deleted task {}", id);
    }

    /// Shows the list of tasks.
    pub fn show_tasks(tasks: &TaskList) {
        if tasks.is_empty() {
            println!("No tasks yet");
            return;
        }

        println!("Tasks ({} remaining)", tasks.remaining());
        println!("─────────────────────────────");
        for task in tasks.iter() {
            println!("{}", Self::format_task(task));
        }
    }

    /// Shows the task list as JSON.
    pub fn show_tasks_json(tasks: &TaskList) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(tasks.as_slice())?);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Shows a success message for a mode switch.
    pub fn show_mode_changed(config: &TimerConfig) {
        println!("* Switched to {} mode", config.mode.label());
        Self::show_durations(config);
    }

    /// Shows the custom durations.
    pub fn show_settings(config: &TimerConfig) {
        println!("Custom timer settings");
        println!("─────────────────────────────");
        println!("Focus: {} min", config.custom_focus_minutes);
        println!("Break: {} min", config.custom_break_minutes);
        if config.mode != TimerMode::Custom {
            println!("(used in custom mode; current mode is {})", config.mode.label());
        }
    }

    /// Shows a success message for saved custom durations.
    pub fn show_settings_saved(config: &TimerConfig) {
        println!("* Saved custom durations");
        println!(
            "  Focus {} min / Break {} min",
            config.custom_focus_minutes, config.custom_break_minutes
        );
    }

    /// Shows the overall status.
    pub fn show_status(config: &TimerConfig, tasks: &TaskList, theme: Theme) {
        println!("{}", crate::types::APP_TITLE);
        println!("─────────────────────────────");
        println!("Mode: {}", config.mode.label());
        Self::show_durations(config);
        println!("Tasks: {} remaining of {}", tasks.remaining(), tasks.len());
        println!("Theme: {}", theme.as_str());
    }

    fn show_durations(config: &TimerConfig) {
        use crate::types::SessionType;

        let minutes = |s: SessionType| config.duration(s) / 60;
        match config.mode {
            TimerMode::Pomodoro => println!(
                "  Focus {} min / Break {} min / Long break {} min",
                minutes(SessionType::Focus),
                minutes(SessionType::Break),
                minutes(SessionType::LongBreak)
            ),
            TimerMode::Custom => println!(
                "  Focus {} min / Break {} min",
                minutes(SessionType::Focus),
                minutes(SessionType::Break)
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Interactive session
    // ------------------------------------------------------------------------

    /// Shows the banner printed when a session starts.
    pub fn show_session_banner(theme: Theme, config: &TimerConfig, state: &TimerState) {
        println!("{} - {}", crate::types::APP_TITLE, theme.greeting());
        println!("─────────────────────────────");
        println!("Mode: {}", config.mode.label());
        Self::show_session_line(config.mode, state);
        Self::show_session_help();
    }

    /// Shows the session key bindings.
    pub fn show_session_help() {
        println!("Commands: [t]oggle (or Enter)  [r]eset  [s]kip  [m]ode <pomodoro|custom>");
        println!("          [c]ustom <focus> <break>  [a]dd <task>  [x] done <id>  [d]elete <id>");
        println!("          [l]ist  [h]elp  [q]uit");
    }

    /// Shows the current session with its clock.
    pub fn show_session_line(mode: TimerMode, state: &TimerState) {
        let (minutes, seconds) = Self::format_time(state.seconds_left);
        let dots = match mode {
            TimerMode::Pomodoro => format!("  {}", Self::cycle_dots(state.cycle)),
            TimerMode::Custom => String::new(),
        };
        println!(
            "{}  {:02}:{:02}{}",
            state.session_type.label(),
            minutes,
            seconds,
            dots
        );
    }

    /// Shows a timer event. `mode` decides whether cycle dots are drawn.
    pub fn show_event(event: &TimerEvent, mode: TimerMode) {
        match event {
            TimerEvent::Tick { seconds_left } => {
                let (minutes, seconds) = Self::format_time(*seconds_left);
                print!("\r  {:02}:{:02} ", minutes, seconds);
                let _ = io::stdout().flush();
            }
            TimerEvent::Started {
                session_type,
                seconds_left,
            } => {
                let (minutes, seconds) = Self::format_time(*seconds_left);
                println!("> {} {:02}:{:02}", session_type.label(), minutes, seconds);
            }
            TimerEvent::Paused { seconds_left } => {
                let (minutes, seconds) = Self::format_time(*seconds_left);
                println!("\n|| Paused at {:02}:{:02}", minutes, seconds);
            }
            TimerEvent::SessionCompleted(t) | TimerEvent::Skipped(t) => {
                let verb = match t.cause {
                    TransitionCause::Completed => "\n* Finished",
                    TransitionCause::Skipped => ">> Skipped",
                };
                println!("{} {}; next up: {}", verb, t.from.label(), t.to.label());
                if mode == TimerMode::Pomodoro {
                    println!("  {}", Self::cycle_dots(t.cycle));
                }
            }
            TimerEvent::Reset {
                session_type,
                seconds_left,
            } => {
                let (minutes, seconds) = Self::format_time(*seconds_left);
                println!("\n<< Reset {} to {:02}:{:02}", session_type.label(), minutes, seconds);
            }
            TimerEvent::ConfigApplied {
                config,
                seconds_left,
            } => {
                let (minutes, seconds) = Self::format_time(*seconds_left);
                println!(
                    "* {} mode, {:02}:{:02} on the clock",
                    config.mode.label(),
                    minutes,
                    seconds
                );
            }
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    /// Formats a task as a list row.
    fn format_task(task: &Task) -> String {
        let mark = if task.completed { "x" } else { " " };
        format!("[{}] {}  {}", mark, task.id, task.text)
    }

    /// Progress through the Pomodoro cycle, one dot per focus session.
    fn cycle_dots(cycle: u32) -> String {
        (0..POMODORO_CYCLES)
            .map(|i| if i < cycle { '●' } else { '○' })
            .collect()
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
