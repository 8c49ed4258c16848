//! Monotonic board invariant: squares never change once set.

use super::super::{Board, GameState};
use super::Invariant;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Once a square transitions from Empty to Occupied, it never changes.
/// This is verified by replaying the move history and comparing.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = Board::new();

        for mov in state.history() {
            // Square must be empty before placing
            if reconstructed.place(mov.position, mov.mark).is_err() {
                return false;
            }
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Move, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(MonotonicBoardInvariant::holds(&GameState::new(Mark::X)));
    }

    #[test]
    fn test_multiple_moves_hold() {
        let state = GameState::replay(
            Mark::X,
            &[
                Position::TopLeft,
                Position::Center,
                Position::TopRight,
                Position::BottomLeft,
            ],
        )
        .unwrap();
        assert!(MonotonicBoardInvariant::holds(&state));
    }

    #[test]
    fn test_duplicate_history_entry_violates() {
        let mut state = GameState::replay(Mark::X, &[Position::Center]).unwrap();
        state.history.push(Move::new(Mark::O, Position::Center));
        assert!(!MonotonicBoardInvariant::holds(&state));
    }

    #[test]
    fn test_corrupted_board_violates() {
        let mut state = GameState::replay(Mark::X, &[Position::Center]).unwrap();
        state.board.clear(Position::Center);
        state.board.put(Position::Center, Mark::O);
        assert!(!MonotonicBoardInvariant::holds(&state));
    }
}
