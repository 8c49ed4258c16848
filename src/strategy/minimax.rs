//! Exhaustive minimax search ("unbeatable" difficulty).
//!
//! The tree is searched to the end of the game with no pruning and no
//! depth discount. Leaves are valued +1 (searching side wins), -1
//! (opponent wins) or 0 (draw).

use crate::games::tictactoe::{Board, GameOutcome, Mark, Position, rules};
use tracing::trace;

/// Returns the best square for `mark`, breaking ties by lowest index.
pub fn select(board: &Board, mark: Mark) -> Position {
    let mut scratch = board.clone();
    let mut best: Option<(Position, i8)> = None;

    for pos in board.empty_positions() {
        scratch.put(pos, mark);
        let value = evaluate(&mut scratch, mark, mark.opponent());
        scratch.clear(pos);
        trace!(position = %pos, value, "Root candidate");

        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((pos, value));
        }
    }

    best.map(|(pos, _)| pos)
        .expect("minimax strategy called on a full board")
}

/// Game-theoretic value of `board` for `ai` with `to_move` to play.
///
/// The board is used as scratch space and restored before returning.
pub fn evaluate(board: &mut Board, ai: Mark, to_move: Mark) -> i8 {
    match rules::detect_outcome(board) {
        GameOutcome::Winner { mark, .. } if mark == ai => return 1,
        GameOutcome::Winner { .. } => return -1,
        GameOutcome::Draw => return 0,
        GameOutcome::InProgress => {}
    }

    let maximizing = to_move == ai;
    let mut best = if maximizing { i8::MIN } else { i8::MAX };
    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }
        board.put(pos, to_move);
        let value = evaluate(board, ai, to_move.opponent());
        board.clear(pos);

        best = if maximizing { best.max(value) } else { best.min(value) };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_takes_immediate_win() {
        assert_eq!(select(&"XX.OO....".parse().unwrap(), Mark::X), Position::TopRight);
    }

    #[test]
    fn test_blocks_column_threat() {
        assert_eq!(select(&"X..X....O".parse().unwrap(), Mark::O), Position::BottomLeft);
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        // Every reply but the center loses against a corner opening.
        assert_eq!(select(&"X........".parse().unwrap(), Mark::O), Position::Center);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut b = Board::new();
        assert_eq!(evaluate(&mut b, Mark::X, Mark::X), 0);
        assert_eq!(b, Board::new());
    }

    #[test]
    fn test_empty_board_tie_breaks_to_first_index() {
        // All openings draw under perfect play.
        assert_eq!(select(&Board::new(), Mark::X), Position::TopLeft);
    }

    #[test]
    fn test_evaluate_detects_forced_loss() {
        // X has a fork: two open lines through the same empty squares.
        // X X . / . O . / X . O, O to move cannot stop both threats.
        let mut b = "XX..O.X.O".parse::<Board>().unwrap();
        assert_eq!(evaluate(&mut b, Mark::O, Mark::O), -1);
    }
}
