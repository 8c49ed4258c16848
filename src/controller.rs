//! Turn-taking state machine between a human and the computer.
//!
//! The controller is synchronous and single-owner. It never sleeps: when
//! the computer has to move it enters [`TurnPhase::AiThinking`] and hands
//! out a [`PendingMove`]. Whoever hosts the controller waits out the delay
//! and then calls [`TurnController::play_ai_move`] with the ticket. A reset
//! invalidates every outstanding ticket, so a move scheduled before the
//! reset can never land on the cleared board.
//!
//! Hosts that must not block while the strategy searches can split the move
//! in two: [`TurnController::plan_ai_move`] hands out an [`AiPlan`] that
//! owns everything the search needs, and
//! [`TurnController::apply_ai_move`] places its result if the ticket is
//! still current.

use crate::config::{ConfigError, FirstMover, GameConfig, Opening};
use crate::events::GameEvent;
use crate::games::tictactoe::{Board, GameOutcome, GameState, Mark, MoveError, Position};
use crate::strategy::{Strategy, random};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Identifies one scheduled computer move.
///
/// Tickets are never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

/// A computer move waiting for its thinking delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    /// Ticket to present to [`TurnController::play_ai_move`].
    pub ticket: Ticket,
    /// How long to wait before presenting it.
    pub delay: Duration,
}

/// A computer move detached from its controller.
///
/// Holds a copy of the board and a forked random source, so
/// [`AiPlan::choose`] can run on another thread.
#[derive(Debug)]
pub struct AiPlan {
    ticket: Ticket,
    board: Board,
    mark: Mark,
    strategy: Strategy,
    rng: StdRng,
}

impl AiPlan {
    /// Ticket of the move being planned.
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Runs the strategy.
    ///
    /// Minimax on an open board visits over half a million positions, so
    /// async hosts should call this off the runtime's worker threads.
    #[instrument(skip(self), fields(ticket = ?self.ticket))]
    pub fn choose(mut self) -> Position {
        self.strategy.select_move(&self.board, self.mark, &mut self.rng)
    }
}

/// Where the controller is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the human to pick a square.
    AwaitingHuman,
    /// The computer's move is scheduled.
    AiThinking {
        /// Ticket of the scheduled move.
        ticket: Ticket,
    },
    /// The game is over; only a reset is accepted.
    Terminal,
}

/// Alternates human input with a computer strategy.
#[derive(Debug)]
pub struct TurnController {
    config: GameConfig,
    strategy: Strategy,
    state: GameState,
    phase: TurnPhase,
    next_ticket: u64,
    rng: StdRng,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl TurnController {
    /// Creates a controller and starts the first game.
    ///
    /// If the computer opens, its first move is either already on the board
    /// or pending, depending on the configured [`Opening`].
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not validate.
    #[instrument(skip(events))]
    pub fn new(
        config: GameConfig,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        let mut controller = Self {
            strategy: config.build_strategy(),
            state: GameState::new(config.first_mark()),
            phase: TurnPhase::AwaitingHuman,
            next_ticket: 0,
            rng,
            events,
            config,
        };
        info!(
            strategy = %controller.config.strategy(),
            human = %controller.human_mark(),
            first_mover = %controller.config.first_mover(),
            "Starting game"
        );
        controller.begin();
        Ok(controller)
    }

    /// Returns the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Mark played by the human.
    pub fn human_mark(&self) -> Mark {
        *self.config.human_mark()
    }

    /// Mark played by the computer.
    pub fn ai_mark(&self) -> Mark {
        self.config.ai_mark()
    }

    /// The computer move currently waiting on its delay, if any.
    pub fn pending(&self) -> Option<PendingMove> {
        match self.phase {
            TurnPhase::AiThinking { ticket } => Some(PendingMove {
                ticket,
                delay: self.config.thinking_delay(),
            }),
            _ => None,
        }
    }

    /// Places the human's mark.
    ///
    /// Returns the computer move scheduled in response, or `None` if the
    /// human's move ended the game.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameAlreadyOver`] after a win or draw.
    /// - [`MoveError::NotYourTurn`] while the computer is thinking.
    /// - [`MoveError::CellOccupied`] if the square is taken.
    ///
    /// State is unchanged on error.
    #[instrument(skip(self))]
    pub fn submit_human_move(&mut self, pos: Position) -> Result<Option<PendingMove>, MoveError> {
        match self.phase {
            TurnPhase::Terminal => return Err(MoveError::GameAlreadyOver),
            TurnPhase::AiThinking { .. } => return Err(MoveError::NotYourTurn),
            TurnPhase::AwaitingHuman => {}
        }

        let outcome = self.state.place(pos)?;
        self.emit(GameEvent::CellUpdated {
            index: pos.to_index(),
            mark: self.human_mark(),
        });

        if outcome.is_terminal() {
            self.finish(outcome);
            return Ok(None);
        }
        Ok(Some(self.schedule_ai()))
    }

    /// Places the human's mark at a raw cell index.
    ///
    /// # Errors
    ///
    /// As [`TurnController::submit_human_move`], plus
    /// [`MoveError::InvalidCellIndex`] for indices outside 0-8.
    pub fn submit_human_index(&mut self, index: usize) -> Result<Option<PendingMove>, MoveError> {
        let pos = Position::try_from_index(index)?;
        self.submit_human_move(pos)
    }

    /// Plays the scheduled computer move identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::StaleMove`] without touching the board if the
    /// ticket was cancelled by a reset or has already been played.
    #[instrument(skip(self))]
    pub fn play_ai_move(&mut self, ticket: Ticket) -> Result<GameOutcome, MoveError> {
        let plan = self.plan_ai_move(ticket)?;
        let pos = plan.choose();
        self.apply_ai_move(ticket, pos)
    }

    /// Detaches the scheduled computer move so it can be searched elsewhere.
    ///
    /// The controller stays in [`TurnPhase::AiThinking`] until the chosen
    /// square comes back through [`TurnController::apply_ai_move`].
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::StaleMove`] if `ticket` is not the pending one.
    pub fn plan_ai_move(&mut self, ticket: Ticket) -> Result<AiPlan, MoveError> {
        self.check_ticket(ticket)?;
        Ok(AiPlan {
            ticket,
            board: self.state.board().clone(),
            mark: self.ai_mark(),
            strategy: self.strategy,
            rng: StdRng::from_rng(&mut self.rng),
        })
    }

    /// Places the square chosen for `ticket`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::StaleMove`] if the ticket was cancelled or played
    ///   while the search ran.
    /// - [`MoveError::CellOccupied`] if the square is taken.
    ///
    /// State is unchanged on error.
    #[instrument(skip(self))]
    pub fn apply_ai_move(
        &mut self,
        ticket: Ticket,
        pos: Position,
    ) -> Result<GameOutcome, MoveError> {
        self.check_ticket(ticket)?;
        self.apply_ai(pos)
    }

    fn check_ticket(&self, ticket: Ticket) -> Result<(), MoveError> {
        match self.phase {
            TurnPhase::AiThinking { ticket: current } if current == ticket => Ok(()),
            phase => {
                debug!(?phase, ?ticket, "Ignoring stale AI move");
                Err(MoveError::StaleMove)
            }
        }
    }

    /// Clears the board and starts over with the configured opening.
    ///
    /// Any scheduled computer move is cancelled. Returns the opening move
    /// scheduled for the new game, if any.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Option<PendingMove> {
        if let TurnPhase::AiThinking { ticket } = self.phase {
            debug!(?ticket, "Cancelling scheduled AI move");
        }
        self.phase = TurnPhase::AwaitingHuman;
        self.state = GameState::new(self.config.first_mark());
        self.emit(GameEvent::BoardCleared);
        info!("Game reset");
        self.begin();
        self.pending()
    }

    /// Applies the opening policy to a fresh game.
    fn begin(&mut self) {
        if *self.config.first_mover() == FirstMover::Human {
            self.phase = TurnPhase::AwaitingHuman;
            return;
        }

        let opening = *self.config.opening();
        if opening == Opening::Scheduled {
            self.schedule_ai();
            return;
        }

        let ai = self.ai_mark();
        let board = self.state.board();
        let pos = match opening {
            Opening::Random => random::select(board, &mut self.rng),
            Opening::RandomOffCenter => {
                random::select_excluding(board, &[Position::Center], &mut self.rng)
            }
            Opening::Immediate | Opening::Scheduled => {
                self.strategy.select_move(board, ai, &mut self.rng)
            }
        };
        debug!(position = %pos, %opening, "Opening move");
        if let Err(e) = self.apply_ai(pos) {
            warn!(position = %pos, error = %e, "Opening move rejected");
        }
    }

    /// Places the computer's mark and moves to the next phase.
    fn apply_ai(&mut self, pos: Position) -> Result<GameOutcome, MoveError> {
        let outcome = self.state.place(pos)?;
        self.emit(GameEvent::CellUpdated {
            index: pos.to_index(),
            mark: self.ai_mark(),
        });

        if outcome.is_terminal() {
            self.finish(outcome);
        } else {
            self.phase = TurnPhase::AwaitingHuman;
        }
        Ok(outcome)
    }

    fn schedule_ai(&mut self) -> PendingMove {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.phase = TurnPhase::AiThinking { ticket };
        self.emit(GameEvent::AiThinking {
            delay_ms: *self.config.thinking_delay_ms(),
        });
        debug!(?ticket, "AI move scheduled");
        PendingMove {
            ticket,
            delay: self.config.thinking_delay(),
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.phase = TurnPhase::Terminal;
        info!(%outcome, "Game over");
        self.emit(GameEvent::GameEnded { outcome });
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            warn!("Event receiver dropped");
        }
    }
}
