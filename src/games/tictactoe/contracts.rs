//! Contract-based validation for tic-tac-toe placements.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::MoveError;
use super::game::GameState;
use super::invariants::{GameInvariants, InvariantSet};
use super::position::Position;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the game has not reached a terminal outcome.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects placements on a finished game.
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        if state.is_over() {
            Err(MoveError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the square at the target position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects placements on occupied squares.
    pub fn check(pos: Position, state: &GameState) -> Result<(), MoveError> {
        if state.board().is_empty(pos) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(pos))
        }
    }
}

/// Contract for placing the side-to-move's mark.
///
/// Preconditions, in order:
/// - Game is not over
/// - Square is empty
///
/// Postconditions:
/// - Exactly one square changed
/// - Board squares never overwritten
/// - Marks alternate
pub struct PlacementContract;

impl Contract<GameState, Position> for PlacementContract {
    #[instrument(skip(state))]
    fn pre(state: &GameState, pos: &Position) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        SquareIsEmpty::check(*pos, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        let changed = before
            .board()
            .squares()
            .iter()
            .zip(after.board().squares())
            .filter(|(a, b)| a != b)
            .count();
        if changed != 1 || after.history().len() != before.history().len() + 1 {
            warn!(changed, "Placement changed an unexpected number of squares");
            return Err(MoveError::InvariantViolation);
        }

        GameInvariants::check_all(after).map_err(|violations| {
            for v in &violations {
                warn!(description = %v.description, "Invariant violated");
            }
            MoveError::InvariantViolation
        })
    }
}
