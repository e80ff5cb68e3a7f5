//! Timer for Hngoc - a focus timer and to-do list for the terminal
//!
//! - Pomodoro mode: 25 minutes of focus, 5 minute breaks, and a 15 minute
//!   long break after every 4 focus sessions
//! - Custom mode: your own focus and break lengths
//! - A to-do list that is saved between runs

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};

use hngoc_timer::app::App;
use hngoc_timer::cli::session;
use hngoc_timer::cli::{Cli, Commands, Display, SettingsArgs, TaskCommand};
use hngoc_timer::settings::SettingsDraft;
use hngoc_timer::storage::{open_or_memory, resolve_data_dir, KeyValueStore};
use hngoc_timer::theme::Theme;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so the session and list output stay clean.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        // No command provided, show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run => session::run(&mut load_app(cli.data_dir)?).await?,
        Commands::Status => {
            let app = load_app(cli.data_dir)?;
            Display::show_status(&app.config(), app.tasks(), Theme::current());
        }
        Commands::Task(task) => execute_task(&mut load_app(cli.data_dir)?, task)?,
        Commands::Mode { mode } => {
            let config = load_app(cli.data_dir)?.set_mode(mode);
            Display::show_mode_changed(&config);
        }
        Commands::Settings(args) => execute_settings(&mut load_app(cli.data_dir)?, args),
        Commands::Completions { shell } => generate_completions(shell),
    }

    Ok(())
}

/// Loads application state from the data directory.
fn load_app(data_dir: Option<PathBuf>) -> Result<App<Box<dyn KeyValueStore>>> {
    let data_dir = resolve_data_dir(data_dir)?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");
    Ok(App::load(open_or_memory(&data_dir)))
}

/// Executes a to-do list subcommand.
fn execute_task<S: KeyValueStore>(app: &mut App<S>, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add { text } => {
            let text = text.join(" ");
            let Some(id) = app.add_task(&text) else {
                bail!("Task text cannot be empty");
            };
            if let Some(task) = app.tasks().get(id) {
                Display::show_task_added(task);
            }
        }
        TaskCommand::List { json } => {
            if json {
                Display::show_tasks_json(app.tasks())?;
            } else {
                Display::show_tasks(app.tasks());
            }
        }
        TaskCommand::Toggle { id } => {
            if !app.toggle_task(id) {
                bail!("No task with id {id}");
            }
            if let Some(task) = app.tasks().get(id) {
                Display::show_task_toggled(task);
            }
        }
        TaskCommand::Delete { id } => {
            if !app.delete_task(id) {
                bail!("No task with id {id}");
            }
            Display::show_task_deleted(id);
        }
    }
    Ok(())
}

/// Shows the custom durations, or saves the given ones.
fn execute_settings<S: KeyValueStore>(app: &mut App<S>, args: SettingsArgs) {
    if args.is_empty() {
        Display::show_settings(&app.config());
        return;
    }

    let mut draft = SettingsDraft::from_config(&app.config());
    if let Some(focus) = args.focus {
        draft.set_focus(focus);
    }
    if let Some(break_minutes) = args.break_minutes {
        draft.set_break(break_minutes);
    }
    let config = draft.save(app);
    Display::show_settings_saved(&config);
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
