//! Win detection logic for tic-tac-toe.

use super::super::{Board, GameOutcome, Mark, Position, Square, WinPattern};
use super::draw::is_full;

/// Returns the first completed line in scan order, with its mark.
pub fn winning_pattern(board: &Board) -> Option<(Mark, WinPattern)> {
    WinPattern::ALL.into_iter().find_map(|pattern| {
        let [a, b, c] = pattern.cells();
        let first = board.get(a);
        match first {
            Square::Occupied(mark) if board.get(b) == first && board.get(c) == first => {
                Some((mark, pattern))
            }
            _ => None,
        }
    })
}

/// Classifies the board: winner (first matching line), draw, or in progress.
pub fn detect_outcome(board: &Board) -> GameOutcome {
    if let Some((mark, pattern)) = winning_pattern(board) {
        GameOutcome::Winner { mark, pattern }
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

/// Number of squares in `pattern` holding `mark`.
pub fn line_count(board: &Board, pattern: WinPattern, mark: Mark) -> usize {
    pattern
        .cells()
        .into_iter()
        .filter(|&pos| board.get(pos) == Square::Occupied(mark))
        .count()
}

/// Finds an empty square that would complete a line for `mark`.
///
/// Lines are scanned in pattern order; the first line with two of `mark`
/// and one empty square decides.
pub fn completing_move(board: &Board, mark: Mark) -> Option<Position> {
    WinPattern::ALL.into_iter().find_map(|pattern| {
        let cells = pattern.cells();
        if line_count(board, pattern, mark) != 2 {
            return None;
        }
        cells.into_iter().find(|&pos| board.is_empty(pos))
    })
}
