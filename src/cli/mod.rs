//! CLI module for Timer for Hngoc.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `session`: Interactive timer session on stdin

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, SettingsArgs, TaskCommand};
pub use display::Display;
pub use session::SessionInput;
