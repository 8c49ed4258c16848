//! Tic-tac-toe board model, rules and game state.

mod action;
mod contracts;
mod game;
mod invariants;
mod outcome;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use contracts::{Contract, GameNotOver, PlacementContract, SquareIsEmpty};
pub use game::GameState;
pub use invariants::{
    AlternatingTurnInvariant, GameInvariants, Invariant, InvariantSet, InvariantViolation,
    MonotonicBoardInvariant,
};
pub use outcome::{GameOutcome, WinPattern};
pub use position::Position;
pub use types::{Board, Mark, ParseBoardError, Square};
