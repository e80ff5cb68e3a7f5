//! Title sinks: where the `MM:SS - Focus | Timer for Hngoc` string goes.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Receives the display string after every state change.
pub trait TitleSink {
    /// Publishes a new title. Must not fail; sinks swallow their own errors.
    fn publish(&mut self, title: &str);
}

/// Sets the terminal window title with the OSC 0 escape sequence.
#[derive(Debug)]
pub struct TerminalTitleSink<W: Write> {
    out: W,
}

impl TerminalTitleSink<io::Stdout> {
    /// Writes to standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalTitleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TitleSink for TerminalTitleSink<W> {
    fn publish(&mut self, title: &str) {
        let result = write!(self.out, "\x1b]0;{title}\x07").and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::debug!(error = %e, "failed to set terminal title");
        }
    }
}

/// Discards every title.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTitleSink;

impl TitleSink for NullTitleSink {
    fn publish(&mut self, _title: &str) {}
}

/// Mock title sink for testing. Clones share the recorded titles.
#[derive(Debug, Default, Clone)]
pub struct MockTitleSink {
    titles: Arc<Mutex<Vec<String>>>,
}

impl MockTitleSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All titles published so far.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    /// The most recent title.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.titles.lock().unwrap().last().cloned()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.titles.lock().unwrap().len()
    }
}

impl TitleSink for MockTitleSink {
    fn publish(&mut self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }
}
