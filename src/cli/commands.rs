//! Command definitions for the Timer for Hngoc CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::TimerMode;

// ============================================================================
// CLI Structure
// ============================================================================

/// Timer for Hngoc - focus timer and to-do list
#[derive(Parser, Debug)]
#[command(
    name = "hngoc-timer",
    version,
    about = "Focus timer with Pomodoro and custom sessions, plus a to-do list",
    long_about = "A terminal focus timer. Pomodoro mode runs 25 minute focus sessions with \
                  5 minute breaks and a 15 minute long break every fourth session.\n\
                  Custom mode uses your own focus and break lengths.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding tasks and settings (overrides HNGOC_TIMER_DATA_DIR)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer interactively in this terminal
    Run,

    /// Show mode, durations and task summary
    Status,

    /// Manage the to-do list
    #[command(subcommand)]
    Task(TaskCommand),

    /// Switch between Pomodoro and custom mode
    Mode {
        /// Timer mode
        #[arg(value_enum)]
        mode: TimerMode,
    },

    /// Show or change the custom focus/break durations
    Settings(SettingsArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// To-do list subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Add a task
    Add {
        /// Task text (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks in insertion order
    List {
        /// Print the raw JSON list
        #[arg(long)]
        json: bool,
    },

    /// Mark a task done, or not done again
    Toggle {
        /// Task id
        id: i64,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: i64,
    },
}

// ============================================================================
// Settings Command Arguments
// ============================================================================

/// Arguments for the settings command
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Custom focus duration in minutes (minimum 1)
    #[arg(short, long, value_name = "MINUTES")]
    pub focus: Option<u32>,

    /// Custom break duration in minutes (minimum 1)
    #[arg(short = 'b', long = "break", value_name = "MINUTES")]
    pub break_minutes: Option<u32>,
}

impl SettingsArgs {
    /// Returns true if neither duration was given.
    pub fn is_empty(&self) -> bool {
        self.focus.is_none() && self.break_minutes.is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================
