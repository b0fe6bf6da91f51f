//! Real-time session driver.
//!
//! Runs a [`SessionController`] inside one tokio task. Commands come in over
//! a bounded channel, a `tokio::time::interval` pump feeds measured elapsed
//! time into `tick`, and every presentation callback goes out as a
//! [`SessionUpdate`] on an unbounded channel. Only the task touches the
//! controller.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::RuntimeConfig;
use crate::core::PreferencesStore;
use crate::engine::{SessionController, SessionSettings, SessionSummary, SessionUpdate, UpdateSink};
use crate::types::Tier;

/// Pending commands before senders wait.
pub const COMMAND_BUFFER: usize = 32;

/// Command delivered to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionCommand {
    /// Start a new session; `difficulty` overrides the stored preference
    Start {
        #[serde(default)]
        difficulty: Option<Tier>,
    },
    Select {
        index: usize,
    },
    Restart,
    Exit,
}

/// Wall time since the last tick, in whole milliseconds
///
/// Sub-millisecond remainders carry over to the next call.
struct ElapsedMs {
    last: Instant,
}

impl ElapsedMs {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn take(&mut self) -> u32 {
        let elapsed = Instant::now().saturating_duration_since(self.last);
        let ms = elapsed.as_millis().min(u128::from(u32::MAX)) as u32;
        self.last += Duration::from_millis(u64::from(ms));
        ms
    }
}

/// Drive one session until `Exit` or until every command sender is dropped
///
/// Returns the summary of the last finished game, if any.
pub async fn run_session<P: PreferencesStore>(
    prefs: P,
    settings: SessionSettings,
    pump_interval: Duration,
    mut commands: mpsc::Receiver<SessionCommand>,
    updates: mpsc::UnboundedSender<SessionUpdate>,
) -> Result<Option<SessionSummary>> {
    let view = UpdateSink(move |update| {
        // Receiver gone means nobody is watching; keep playing.
        let _ = updates.send(update);
    });
    let mut session =
        SessionController::new(prefs, view, settings).context("invalid session settings")?;

    let mut elapsed = ElapsedMs::new();
    let mut pump = time::interval(pump_interval);
    pump.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = pump.tick() => {
                session.tick(elapsed.take());
            }
            command = commands.recv() => {
                // Settle time first so a late selection lands after its deadline.
                session.tick(elapsed.take());

                let Some(command) = command else {
                    tracing::debug!("command channel closed");
                    session.exit();
                    break;
                };

                tracing::trace!(?command, "session command");
                match command {
                    SessionCommand::Start { difficulty } => session
                        .start_session(difficulty)
                        .context("could not start session")?,
                    SessionCommand::Select { index } => {
                        session.on_tile_selected(index);
                    }
                    SessionCommand::Restart => {
                        session.restart().context("could not restart session")?
                    }
                    SessionCommand::Exit => {
                        session.exit();
                        break;
                    }
                }
            }
        }
    }

    Ok(session.summary().cloned())
}

/// Running session task.
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    updates: mpsc::UnboundedReceiver<SessionUpdate>,
    task: JoinHandle<Result<Option<SessionSummary>>>,
}

impl SessionHandle {
    /// Spawn a session task on the current tokio runtime
    pub fn spawn<P>(prefs: P, settings: SessionSettings, pump_interval: Duration) -> Self
    where
        P: PreferencesStore + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<SessionCommand>(COMMAND_BUFFER);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<SessionUpdate>();

        let task = tokio::spawn(run_session(prefs, settings, pump_interval, cmd_rx, out_tx));

        Self {
            commands: cmd_tx,
            updates: out_rx,
            task,
        }
    }

    /// Spawn with preferences, board and seed taken from `config`
    pub fn spawn_from_config(config: &RuntimeConfig) -> Result<Self> {
        let prefs = config
            .open_preferences()
            .context("could not open preferences")?;
        Ok(Self::spawn(
            prefs,
            config.session_settings(),
            config.pump_interval(),
        ))
    }

    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("session task has stopped"))
    }

    pub async fn start(&self, difficulty: Option<Tier>) -> Result<()> {
        self.send(SessionCommand::Start { difficulty }).await
    }

    pub async fn select(&self, index: usize) -> Result<()> {
        self.send(SessionCommand::Select { index }).await
    }

    pub async fn restart(&self) -> Result<()> {
        self.send(SessionCommand::Restart).await
    }

    pub async fn exit(&self) -> Result<()> {
        self.send(SessionCommand::Exit).await
    }

    /// Next presentation update; `None` once the task has stopped
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        self.updates.recv().await
    }

    /// Close the command channel and wait for the task to finish
    pub async fn join(self) -> Result<Option<SessionSummary>> {
        let Self { commands, task, .. } = self;
        drop(commands);
        task.await.context("session task panicked")?
    }
}
