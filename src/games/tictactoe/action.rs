//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! a player's intent and are recorded in the game history.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The position where the mark lands.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a move was rejected.
///
/// Every variant is recoverable: the rejected call leaves game state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The target square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The game has ended; only a reset is accepted.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The cell index is outside 0-8.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    InvalidCellIndex(#[error(not(source))] usize),

    /// The computer opponent is still thinking.
    #[display("It is not the human player's turn")]
    NotYourTurn,

    /// A scheduled AI move was cancelled by a reset or already played.
    #[display("Scheduled AI move is stale")]
    StaleMove,

    /// A placement broke a board invariant (postcondition failure).
    #[display("Invariant violation after placement")]
    InvariantViolation,

    /// The session actor has shut down.
    #[display("Game session is closed")]
    SessionClosed,
}
