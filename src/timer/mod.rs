//! Timer driver.
//!
//! - `engine`: async countdown loop around the pure session state machine
//! - `title`: sinks for the display string

pub mod engine;
pub mod title;

pub use engine::{TimerCommand, TimerEngine, TimerEvent};
pub use title::{MockTitleSink, NullTitleSink, TerminalTitleSink, TitleSink};
