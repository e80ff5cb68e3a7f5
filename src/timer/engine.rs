//! Timer engine for Timer for Hngoc.
//!
//! This module drives the session state machine:
//! - Countdown with tokio::time::interval, ticking only while active
//! - Commands (toggle, reset, skip, config change) over a channel
//! - Event firing for the display layer
//! - Title publishing after every state change

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::types::{SessionType, TickOutcome, TimerConfig, TimerState, Transition};

use super::title::TitleSink;

/// Countdown granularity.
const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// TimerCommand
// ============================================================================

/// User actions delivered to a running engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start or pause the countdown
    Toggle,
    /// Reload the current session and pause
    Reset,
    /// Jump to the next session and pause
    Skip,
    /// Mode or custom durations changed
    ApplyConfig(TimerConfig),
    /// Stop the engine loop
    Shutdown,
}

// ============================================================================
// TimerEvent
// ============================================================================

/// Events emitted after each state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Current session
        session_type: SessionType,
        /// Remaining seconds
        seconds_left: u32,
    },
    /// Countdown paused by the user
    Paused {
        /// Remaining seconds
        seconds_left: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        seconds_left: u32,
    },
    /// A session ran out and the next one was loaded (paused)
    SessionCompleted(Transition),
    /// A session was skipped and the next one was loaded (paused)
    Skipped(Transition),
    /// The current session was reloaded
    Reset {
        /// Current session
        session_type: SessionType,
        /// Remaining seconds
        seconds_left: u32,
    },
    /// A new configuration was applied
    ConfigApplied {
        /// The new configuration
        config: TimerConfig,
        /// Remaining seconds after the reload
        seconds_left: u32,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Owns the timer state and applies side effects around each transition.
pub struct TimerEngine {
    /// Current countdown state
    state: TimerState,
    /// Configuration the durations are derived from
    config: TimerConfig,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Display string sink
    title: Box<dyn TitleSink + Send>,
}

impl TimerEngine {
    /// Creates an engine with a fresh focus session and publishes its title.
    pub fn new(
        config: TimerConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
        title: Box<dyn TitleSink + Send>,
    ) -> Self {
        let mut engine = Self {
            state: TimerState::new(&config),
            config,
            event_tx,
            title,
        };
        engine.publish_title();
        engine
    }

    /// Runs the timer loop until `Shutdown` or until the command channel
    /// closes.
    ///
    /// The tick branch is only polled while the timer is active. The
    /// interval restarts after every command, so a fresh start waits a full
    /// second and two countdowns never overlap.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<TimerCommand>) -> Result<()> {
        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick(), if self.state.is_active => {
                    self.tick()?;
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        tracing::debug!("command channel closed, stopping timer");
                        break;
                    };
                    if command == TimerCommand::Shutdown {
                        tracing::debug!("timer shutdown requested");
                        break;
                    }
                    self.handle_command(command)?;
                    ticker.reset();
                }
            }
        }

        Ok(())
    }

    /// Applies a single command.
    ///
    /// # Errors
    ///
    /// Returns an error if the event receiver has been dropped.
    pub fn handle_command(&mut self, command: TimerCommand) -> Result<()> {
        match command {
            TimerCommand::Toggle => self.toggle(),
            TimerCommand::Reset => self.reset(),
            TimerCommand::Skip => self.skip(),
            TimerCommand::ApplyConfig(config) => self.apply_config(config),
            TimerCommand::Shutdown => Ok(()),
        }
    }

    /// Processes one elapsed second.
    pub fn tick(&mut self) -> Result<()> {
        match self.state.tick(&self.config) {
            TickOutcome::Idle => return Ok(()),
            TickOutcome::Counted { seconds_left } => {
                self.send(TimerEvent::Tick { seconds_left })
                    .context("Failed to send tick event")?;
            }
            TickOutcome::Completed(transition) => {
                tracing::info!(
                    from = transition.from.as_str(),
                    to = transition.to.as_str(),
                    cycle = transition.cycle,
                    "session completed"
                );
                self.send(TimerEvent::Tick { seconds_left: 0 })
                    .context("Failed to send tick event")?;
                self.send(TimerEvent::SessionCompleted(transition))
                    .context("Failed to send session completed event")?;
            }
        }
        self.publish_title();
        Ok(())
    }

    /// Starts or pauses the countdown.
    pub fn toggle(&mut self) -> Result<()> {
        let event = if self.state.toggle() {
            TimerEvent::Started {
                session_type: self.state.session_type,
                seconds_left: self.state.seconds_left,
            }
        } else {
            TimerEvent::Paused {
                seconds_left: self.state.seconds_left,
            }
        };
        tracing::debug!(active = self.state.is_active, "timer toggled");
        self.publish_title();
        self.send(event).context("Failed to send toggle event")
    }

    /// Reloads the current session and pauses.
    pub fn reset(&mut self) -> Result<()> {
        self.state.reset(&self.config);
        tracing::debug!(session = self.state.session_type.as_str(), "timer reset");
        self.publish_title();
        self.send(TimerEvent::Reset {
            session_type: self.state.session_type,
            seconds_left: self.state.seconds_left,
        })
        .context("Failed to send reset event")
    }

    /// Moves to the next session and pauses.
    pub fn skip(&mut self) -> Result<()> {
        let transition = self.state.skip(&self.config);
        tracing::info!(
            from = transition.from.as_str(),
            to = transition.to.as_str(),
            cycle = transition.cycle,
            "session skipped"
        );
        self.publish_title();
        self.send(TimerEvent::Skipped(transition))
            .context("Failed to send skipped event")
    }

    /// Switches to a new configuration.
    ///
    /// The current session is kept; its remaining time is reloaded with the
    /// new durations and the timer pauses.
    pub fn apply_config(&mut self, config: TimerConfig) -> Result<()> {
        self.config = config;
        self.state.apply_config(&self.config);
        tracing::info!(mode = %config.mode, "timer configuration applied");
        self.publish_title();
        self.send(TimerEvent::ConfigApplied {
            config,
            seconds_left: self.state.seconds_left,
        })
        .context("Failed to send config applied event")
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    fn publish_title(&mut self) {
        let title = self.state.title();
        self.title.publish(&title);
    }

    fn send(&self, event: TimerEvent) -> Result<(), mpsc::error::SendError<TimerEvent>> {
        self.event_tx.send(event)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::title::MockTitleSink;
    use crate::types::{TimerMode, TransitionCause};

    fn create_engine(
        config: TimerConfig,
    ) -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>, MockTitleSink) {
        let (tx, rx) = mpsc::unbounded_channel();
        let titles = MockTitleSink::new();
        let engine = TimerEngine::new(config, tx, Box::new(titles.clone()));
        (engine, rx, titles)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ------------------------------------------------------------------------
    // TimerEngine Tests
    // ------------------------------------------------------------------------

    mod timer_engine_tests {
        use super::*;

        #[test]
        fn test_new_engine_publishes_title() {
            let (engine, mut rx, titles) = create_engine(TimerConfig::default());

            assert_eq!(engine.state().seconds_left, 1500);
            assert_eq!(titles.titles(), vec!["25:00 - Focus | Timer for Hngoc"]);
            assert!(drain(&mut rx).is_empty());
        }

        #[test]
        fn test_toggle_start_and_pause() {
            let (mut engine, mut rx, _titles) = create_engine(TimerConfig::default());

            engine.toggle().unwrap();
            assert!(engine.state().is_active);
            engine.toggle().unwrap();
            assert!(!engine.state().is_active);

            assert_eq!(
                drain(&mut rx),
                vec![
                    TimerEvent::Started {
                        session_type: SessionType::Focus,
                        seconds_left: 1500
                    },
                    TimerEvent::Paused { seconds_left: 1500 },
                ]
            );
        }

        #[test]
        fn test_tick_while_paused_sends_nothing() {
            let (mut engine, mut rx, titles) = create_engine(TimerConfig::default());
            engine.tick().unwrap();
            assert!(drain(&mut rx).is_empty());
            assert_eq!(titles.count(), 1);
        }

        #[test]
        fn test_tick_updates_title() {
            let (mut engine, mut rx, titles) = create_engine(TimerConfig::default());
            engine.toggle().unwrap();
            engine.tick().unwrap();

            assert_eq!(titles.last().unwrap(), "24:59 - Focus | Timer for Hngoc");
            assert_eq!(
                drain(&mut rx).last(),
                Some(&TimerEvent::Tick { seconds_left: 1499 })
            );
        }

        #[test]
        fn test_completion_emits_transition() {
            let (mut engine, mut rx, titles) = create_engine(TimerConfig::default());
            engine.toggle().unwrap();
            engine.state_mut().seconds_left = 1;
            drain(&mut rx);

            engine.tick().unwrap();

            let events = drain(&mut rx);
            assert_eq!(
                events,
                vec![
                    TimerEvent::Tick { seconds_left: 0 },
                    TimerEvent::SessionCompleted(Transition {
                        from: SessionType::Focus,
                        to: SessionType::Break,
                        cycle: 1,
                        cause: TransitionCause::Completed,
                    }),
                ]
            );
            assert!(!engine.state().is_active);
            assert_eq!(titles.last().unwrap(), "05:00 - Break | Timer for Hngoc");
        }

        #[test]
        fn test_skip_and_reset() {
            let (mut engine, mut rx, _titles) = create_engine(TimerConfig::default());

            engine.skip().unwrap();
            engine.toggle().unwrap();
            engine.tick().unwrap();
            engine.reset().unwrap();

            assert_eq!(engine.state().session_type, SessionType::Break);
            assert_eq!(engine.state().seconds_left, 300);
            assert!(!engine.state().is_active);

            let events = drain(&mut rx);
            assert!(matches!(events[0], TimerEvent::Skipped(_)));
            assert_eq!(
                events.last(),
                Some(&TimerEvent::Reset {
                    session_type: SessionType::Break,
                    seconds_left: 300
                })
            );
        }

        #[test]
        fn test_apply_config_reloads_current_session() {
            let (mut engine, mut rx, titles) = create_engine(TimerConfig::default());
            engine.toggle().unwrap();
            engine.tick().unwrap();

            let custom = TimerConfig::default().with_mode(TimerMode::Custom);
            engine.handle_command(TimerCommand::ApplyConfig(custom)).unwrap();

            assert_eq!(engine.config(), &custom);
            assert_eq!(engine.state().session_type, SessionType::Focus);
            assert_eq!(engine.state().seconds_left, 2700);
            assert!(!engine.state().is_active);
            assert_eq!(titles.last().unwrap(), "45:00 - Focus | Timer for Hngoc");
            assert_eq!(
                drain(&mut rx).last(),
                Some(&TimerEvent::ConfigApplied {
                    config: custom,
                    seconds_left: 2700
                })
            );
        }

        #[test]
        fn test_send_fails_when_receiver_dropped() {
            let (mut engine, rx, _titles) = create_engine(TimerConfig::default());
            drop(rx);
            assert!(engine.toggle().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Integration Tests with Tokio Runtime
    // ------------------------------------------------------------------------

    mod integration_tests {
        use super::*;
        use tokio::time::sleep;

        fn tick_count(events: &[TimerEvent]) -> usize {
            events
                .iter()
                .filter(|e| matches!(e, TimerEvent::Tick { .. }))
                .count()
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_counts_down_while_active() {
            let (engine, mut rx, titles) = create_engine(TimerConfig::default());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(async move {
                let mut engine = engine;
                let result = engine.run(cmd_rx).await;
                (engine, result)
            });

            cmd_tx.send(TimerCommand::Toggle).unwrap();
            sleep(Duration::from_millis(3500)).await;
            cmd_tx.send(TimerCommand::Shutdown).unwrap();

            let (engine, result) = handle.await.unwrap();
            result.unwrap();

            assert_eq!(tick_count(&drain(&mut rx)), 3);
            assert_eq!(engine.state().seconds_left, 1497);
            assert_eq!(titles.last().unwrap(), "24:57 - Focus | Timer for Hngoc");
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_does_not_tick_when_paused() {
            let (engine, mut rx, _titles) = create_engine(TimerConfig::default());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(async move {
                let mut engine = engine;
                let result = engine.run(cmd_rx).await;
                (engine, result)
            });

            sleep(Duration::from_secs(5)).await;
            drop(cmd_tx);

            let (engine, result) = handle.await.unwrap();
            result.unwrap();

            assert!(drain(&mut rx).is_empty());
            assert_eq!(engine.state().seconds_left, 1500);
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_auto_pauses_at_session_boundary() {
            let config = TimerConfig::default()
                .with_mode(TimerMode::Custom)
                .with_custom_focus_minutes(1)
                .with_custom_break_minutes(2);
            let (engine, mut rx, _titles) = create_engine(config);
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(async move {
                let mut engine = engine;
                let result = engine.run(cmd_rx).await;
                (engine, result)
            });

            cmd_tx.send(TimerCommand::Toggle).unwrap();
            // Well past the focus session; the break must not start on its own
            sleep(Duration::from_secs(90)).await;
            cmd_tx.send(TimerCommand::Shutdown).unwrap();

            let (engine, result) = handle.await.unwrap();
            result.unwrap();

            let events = drain(&mut rx);
            assert_eq!(tick_count(&events), 60);
            assert!(events.iter().any(|e| matches!(
                e,
                TimerEvent::SessionCompleted(Transition {
                    to: SessionType::Break,
                    ..
                })
            )));
            assert_eq!(engine.state().session_type, SessionType::Break);
            assert_eq!(engine.state().seconds_left, 120);
            assert!(!engine.state().is_active);
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_resume_does_not_double_tick() {
            let (engine, mut rx, _titles) = create_engine(TimerConfig::default());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(async move {
                let mut engine = engine;
                let result = engine.run(cmd_rx).await;
                (engine, result)
            });

            cmd_tx.send(TimerCommand::Toggle).unwrap();
            sleep(Duration::from_millis(1500)).await;
            cmd_tx.send(TimerCommand::Toggle).unwrap();
            cmd_tx.send(TimerCommand::Toggle).unwrap();
            sleep(Duration::from_millis(2500)).await;
            cmd_tx.send(TimerCommand::Shutdown).unwrap();

            let (engine, result) = handle.await.unwrap();
            result.unwrap();

            // One tick before the pause, two after the resume
            assert_eq!(tick_count(&drain(&mut rx)), 3);
            assert_eq!(engine.state().seconds_left, 1497);
        }
    }
}
