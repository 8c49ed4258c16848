//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Square};
use super::win::winning_pattern;

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no completed line.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winning_pattern(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Position};

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.place(Position::Center, Mark::X).unwrap();
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_draw_detection() {
        let board: Board = "XOX|OXX|OXO".parse().unwrap();
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        let board: Board = "XXX|OOX|XOO".parse().unwrap();
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
