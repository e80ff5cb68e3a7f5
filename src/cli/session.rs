//! Interactive timer session.
//!
//! Reads one command per line from stdin and forwards timer actions to a
//! [`TimerEngine`] running on the same runtime. Mode and duration changes are
//! persisted through [`App`] before the engine sees them.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::app::App;
use crate::settings::SettingsDraft;
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use crate::timer::{TerminalTitleSink, TimerCommand, TimerEngine, TimerEvent};
use crate::types::TimerMode;

use super::display::Display;

// ============================================================================
// SessionInput
// ============================================================================

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Toggle,
    Reset,
    Skip,
    Mode(TimerMode),
    Custom { focus: u32, break_minutes: u32 },
    AddTask(String),
    ToggleTask(i64),
    DeleteTask(i64),
    ListTasks,
    Help,
    Quit,
}

impl SessionInput {
    /// Parses a line such as `t`, `skip`, `m custom`, `c 50 10` or `x <id>`.
    ///
    /// An empty line toggles the timer.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" | "t" | "toggle" | "start" | "pause" => Ok(SessionInput::Toggle),
            "r" | "reset" => Ok(SessionInput::Reset),
            "s" | "skip" => Ok(SessionInput::Skip),
            "m" | "mode" => rest.parse().map(SessionInput::Mode),
            "c" | "custom" => Self::parse_custom(rest),
            "a" | "add" => {
                if rest.is_empty() {
                    Err("usage: add <task>".to_string())
                } else {
                    Ok(SessionInput::AddTask(rest.to_string()))
                }
            }
            "x" | "done" => {
                Self::parse_id(rest, "usage: done <task id>").map(SessionInput::ToggleTask)
            }
            "d" | "del" | "delete" => {
                Self::parse_id(rest, "usage: delete <task id>").map(SessionInput::DeleteTask)
            }
            "l" | "list" | "tasks" => Ok(SessionInput::ListTasks),
            "h" | "help" | "?" => Ok(SessionInput::Help),
            "q" | "quit" | "exit" => Ok(SessionInput::Quit),
            other => Err(format!("unknown command: {other} (type h for help)")),
        }
    }

    fn parse_id(rest: &str, usage: &str) -> Result<i64, String> {
        rest.parse::<i64>().map_err(|_| usage.to_string())
    }

    fn parse_custom(rest: &str) -> Result<Self, String> {
        const USAGE: &str = "usage: custom <focus minutes> <break minutes>";

        let mut parts = rest.split_whitespace();
        let (Some(focus), Some(brk), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(USAGE.to_string());
        };
        let focus = focus.parse::<u32>().map_err(|_| USAGE.to_string())?;
        let break_minutes = brk.parse::<u32>().map_err(|_| USAGE.to_string())?;
        Ok(SessionInput::Custom {
            focus,
            break_minutes,
        })
    }
}

// ============================================================================
// Session
// ============================================================================

/// Runs the interactive session on stdin until `quit` or end of input.
pub async fn run<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_with_input(app, stdin).await
}

/// Runs a session reading commands from `input`.
pub async fn run_with_input<S, R>(app: &mut App<S>, input: R) -> Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
{
    let config = app.config();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let mut engine = TimerEngine::new(config, event_tx, Box::new(TerminalTitleSink::stdout()));
    Display::show_session_banner(Theme::current(), &config, engine.state());

    let engine_task = tokio::spawn(async move { engine.run(cmd_rx).await });

    let printer = tokio::spawn(async move {
        let mut mode = config.mode;
        while let Some(event) = event_rx.recv().await {
            if let TimerEvent::ConfigApplied { config, .. } = &event {
                mode = config.mode;
            }
            Display::show_event(&event, mode);
        }
    });

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match SessionInput::parse(&line) {
            Ok(SessionInput::Quit) => break,
            Ok(input) => dispatch(app, &cmd_tx, input)?,
            Err(message) => Display::show_error(&message),
        }
    }

    // The engine may already be gone if it failed; its error surfaces below
    let _ = cmd_tx.send(TimerCommand::Shutdown);
    engine_task.await.context("Timer task panicked")??;
    printer.await.context("Display task panicked")?;
    println!();

    Ok(())
}

/// Applies one input: timer actions go to the engine, config and task
/// changes go through the app first.
fn dispatch<S: KeyValueStore>(
    app: &mut App<S>,
    commands: &mpsc::UnboundedSender<TimerCommand>,
    input: SessionInput,
) -> Result<()> {
    let command = match input {
        SessionInput::Toggle => TimerCommand::Toggle,
        SessionInput::Reset => TimerCommand::Reset,
        SessionInput::Skip => TimerCommand::Skip,
        SessionInput::Mode(mode) => TimerCommand::ApplyConfig(app.set_mode(mode)),
        SessionInput::Custom {
            focus,
            break_minutes,
        } => {
            let mut draft = SettingsDraft::from_config(&app.config());
            draft.set_focus(focus);
            draft.set_break(break_minutes);
            TimerCommand::ApplyConfig(draft.save(app))
        }
        SessionInput::AddTask(text) => {
            if let Some(task) = app.add_task(&text).and_then(|id| app.tasks().get(id)) {
                Display::show_task_added(task);
            }
            return Ok(());
        }
        SessionInput::ToggleTask(id) => {
            if !app.toggle_task(id) {
                Display::show_error(&format!("No task with id {id}"));
            } else if let Some(task) = app.tasks().get(id) {
                Display::show_task_toggled(task);
            }
            return Ok(());
        }
        SessionInput::DeleteTask(id) => {
            if app.delete_task(id) {
                Display::show_task_deleted(id);
            } else {
                Display::show_error(&format!("No task with id {id}"));
            }
            return Ok(());
        }
        SessionInput::ListTasks => {
            app.reload_tasks();
            Display::show_tasks(app.tasks());
            return Ok(());
        }
        SessionInput::Help => {
            Display::show_session_help();
            return Ok(());
        }
        SessionInput::Quit => return Ok(()),
    };

    commands
        .send(command)
        .context("Timer is no longer running")
}

// ============================================================================
// Tests
// ============================================================================
