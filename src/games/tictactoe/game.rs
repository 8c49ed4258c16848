//! Mutable game state: board, side to move, outcome and history.

use super::action::{Move, MoveError};
use super::contracts::{Contract, PlacementContract};
use super::outcome::GameOutcome;
use super::position::Position;
use super::rules::detect_outcome;
use super::types::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Complete state of one game.
///
/// Placements go through [`GameState::place`], which enforces the
/// placement contract and updates the outcome. Once the outcome is
/// terminal every further placement is rejected until the state is
/// replaced by a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(super) board: Board,
    pub(super) to_move: Mark,
    pub(super) outcome: GameOutcome,
    pub(super) history: Vec<Move>,
}

impl GameState {
    /// Creates an empty game where `first` moves first.
    pub fn new(first: Mark) -> Self {
        Self {
            board: Board::new(),
            to_move: first,
            outcome: GameOutcome::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to play next.
    ///
    /// After a terminal outcome this is the mark that made the last move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the current outcome.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns true once a win or draw has been reached.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Places the mark to move at `pos` and re-evaluates the outcome.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameAlreadyOver`] if the outcome is terminal.
    /// - [`MoveError::CellOccupied`] if the square is taken.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn place(&mut self, pos: Position) -> Result<GameOutcome, MoveError> {
        PlacementContract::pre(self, &pos)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mark = self.to_move;
        self.board.place(pos, mark)?;
        self.history.push(Move::new(mark, pos));
        self.outcome = detect_outcome(&self.board);
        if !self.outcome.is_terminal() {
            self.to_move = mark.opponent();
        }

        #[cfg(debug_assertions)]
        PlacementContract::post(&before, self)?;

        debug!(move_count = self.history.len(), outcome = ?self.outcome, "Mark placed");
        Ok(self.outcome)
    }

    /// Replays a sequence of positions from an empty board.
    ///
    /// # Errors
    ///
    /// Returns the first rejection encountered.
    #[instrument]
    pub fn replay(first: Mark, positions: &[Position]) -> Result<Self, MoveError> {
        let mut state = Self::new(first);
        for &pos in positions {
            state.place(pos)?;
        }
        Ok(state)
    }
}
