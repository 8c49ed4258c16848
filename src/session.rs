//! Async host for a [`TurnController`].
//!
//! A session is an actor: one tokio task owns the controller and handles
//! commands one at a time, so callers on any thread are serialized. The
//! thinking delay runs as a separate timer task that reports back with its
//! ticket. Resetting aborts the timer, and the controller rejects the
//! ticket anyway if the abort loses the race.
//!
//! When the delay elapses the strategy search runs on tokio's blocking pool
//! and its result comes back as another command, so a full minimax search
//! never stalls the actor or a runtime worker.

use crate::config::{ConfigError, GameConfig};
use crate::controller::{AiPlan, PendingMove, Ticket, TurnController, TurnPhase};
use crate::events::GameEvent;
use crate::games::tictactoe::{Board, GameOutcome, Mark, MoveError, Position};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Point-in-time view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Board contents.
    pub board: Board,
    /// Current outcome.
    pub outcome: GameOutcome,
    /// Turn phase.
    pub phase: TurnPhase,
    /// Mark played by the human.
    pub human_mark: Mark,
}

enum Command {
    HumanMove {
        index: usize,
        reply: oneshot::Sender<Result<(), MoveError>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
    AiDue(Ticket),
    AiChosen {
        ticket: Ticket,
        position: Position,
    },
    Shutdown,
}

/// Handle to a running game session.
///
/// The session stops when every handle has been dropped.
#[derive(Debug, Clone)]
pub struct GameSession {
    commands: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::HumanMove { index, .. } => write!(f, "HumanMove({})", index),
            Command::Reset { .. } => write!(f, "Reset"),
            Command::Snapshot { .. } => write!(f, "Snapshot"),
            Command::AiDue(ticket) => write!(f, "AiDue({:?})", ticket),
            Command::AiChosen { ticket, position } => {
                write!(f, "AiChosen({:?}, {})", ticket, position)
            }
            Command::Shutdown => write!(f, "Shutdown"),
        }
    }
}

impl GameSession {
    /// Starts a session on the current tokio runtime.
    ///
    /// Returns the handle and the stream of events for the presentation
    /// layer.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate.
    #[instrument(skip(config))]
    pub fn spawn(
        config: GameConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<GameEvent>), ConfigError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let controller = TurnController::new(config, event_tx)?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let mut actor = SessionActor {
            controller,
            commands: command_tx.downgrade(),
            timer: None,
        };
        actor.sync_timer();
        tokio::spawn(actor.run(command_rx));
        info!("Game session started");

        Ok((Self { commands: command_tx }, event_rx))
    }

    /// Submits the human's move at a cell index (0-8).
    ///
    /// # Errors
    ///
    /// Returns the controller's rejection, [`MoveError::InvalidCellIndex`]
    /// for out-of-range indices, or [`MoveError::SessionClosed`].
    pub async fn submit_human_move(&self, index: usize) -> Result<(), MoveError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::HumanMove { index, reply })?;
        rx.await.map_err(|_| MoveError::SessionClosed)?
    }

    /// Clears the board and cancels any scheduled computer move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SessionClosed`] if the session has stopped.
    pub async fn reset(&self) -> Result<(), MoveError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Reset { reply })?;
        rx.await.map_err(|_| MoveError::SessionClosed)
    }

    /// Returns the current board, outcome and phase.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SessionClosed`] if the session has stopped.
    pub async fn snapshot(&self) -> Result<Snapshot, MoveError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply })?;
        rx.await.map_err(|_| MoveError::SessionClosed)
    }

    /// Stops the session and cancels any scheduled computer move.
    ///
    /// Later calls on any handle return [`MoveError::SessionClosed`].
    /// Stopping an already stopped session is not an error.
    pub fn shutdown(&self) {
        if self.send(Command::Shutdown).is_err() {
            debug!("Session already stopped");
        }
    }

    fn send(&self, command: Command) -> Result<(), MoveError> {
        self.commands
            .send(command)
            .map_err(|_| MoveError::SessionClosed)
    }
}

struct SessionActor {
    controller: TurnController,
    commands: mpsc::WeakUnboundedSender<Command>,
    timer: Option<(Ticket, JoinHandle<()>)>,
}

impl SessionActor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = commands.recv().await {
            debug!(?command, "Session command");
            match command {
                Command::HumanMove { index, reply } => {
                    let result = self.controller.submit_human_index(index).map(|_| ());
                    if let Err(e) = &result {
                        debug!(error = %e, "Human move rejected");
                    }
                    let _ = reply.send(result);
                }
                Command::Reset { reply } => {
                    self.cancel_timer();
                    self.controller.reset();
                    let _ = reply.send(());
                }
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
                Command::Shutdown => break,
                Command::AiDue(ticket) => match self.controller.plan_ai_move(ticket) {
                    Ok(plan) => self.start_search(plan),
                    Err(e) => debug!(error = %e, ?ticket, "AI move dropped"),
                },
                Command::AiChosen { ticket, position } => {
                    if let Err(e) = self.controller.apply_ai_move(ticket, position) {
                        debug!(error = %e, ?ticket, %position, "AI move dropped");
                    }
                }
            }
            self.sync_timer();
        }
        info!("Game session stopped");
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.controller.state();
        Snapshot {
            board: state.board().clone(),
            outcome: state.outcome(),
            phase: self.controller.phase(),
            human_mark: self.controller.human_mark(),
        }
    }

    /// Makes the running timer match the controller's pending move.
    fn sync_timer(&mut self) {
        let pending = self.controller.pending();
        let current = self.timer.as_ref().map(|(ticket, _)| *ticket);
        if current == pending.map(|p| p.ticket) {
            return;
        }

        self.cancel_timer();
        if let Some(pending) = pending {
            self.start_timer(pending);
        }
    }

    fn start_timer(&mut self, pending: PendingMove) {
        let PendingMove { ticket, delay } = pending;
        let commands = self.commands.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match commands.upgrade() {
                Some(commands) => {
                    let _ = commands.send(Command::AiDue(ticket));
                }
                None => warn!(?ticket, "Session closed before AI move was due"),
            }
        });
        debug!(?ticket, ?delay, "AI timer started");
        self.timer = Some((ticket, handle));
    }

    /// Runs the strategy on the blocking pool.
    ///
    /// The search task takes the timer's slot, so a reset aborts it and the
    /// chosen square is never delivered.
    fn start_search(&mut self, plan: AiPlan) {
        let ticket = plan.ticket();
        let commands = self.commands.clone();
        let handle = tokio::spawn(async move {
            let position = match tokio::task::spawn_blocking(move || plan.choose()).await {
                Ok(position) => position,
                Err(e) => {
                    warn!(error = %e, ?ticket, "AI search failed");
                    return;
                }
            };
            match commands.upgrade() {
                Some(commands) => {
                    let _ = commands.send(Command::AiChosen { ticket, position });
                }
                None => debug!(?ticket, "Session closed during AI search"),
            }
        });
        debug!(?ticket, "AI search started");
        if let Some((_, timer)) = self.timer.replace((ticket, handle)) {
            timer.abort();
        }
    }

    fn cancel_timer(&mut self) {
        if let Some((ticket, handle)) = self.timer.take() {
            handle.abort();
            debug!(?ticket, "AI timer aborted");
        }
    }
}

impl Drop for SessionActor {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// Convenience for presentation layers that track positions by name.
impl GameSession {
    /// Submits the human's move at a named position.
    ///
    /// # Errors
    ///
    /// As [`GameSession::submit_human_move`].
    pub async fn submit_position(&self, pos: Position) -> Result<(), MoveError> {
        self.submit_human_move(pos.to_index()).await
    }
}
