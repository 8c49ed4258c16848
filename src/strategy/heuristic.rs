//! Single-ply heuristic ("medium" difficulty).
//!
//! Decision tiers, strictly in order:
//! 1. complete one of our own lines,
//! 2. block the opponent's completing square,
//! 3. play the square whose resulting position scores best.

use crate::games::tictactoe::{Board, Mark, Position, WinPattern, rules};
use rand::Rng;
use tracing::trace;

/// Weight of a line holding three, two or one of a mark.
const LINE_WEIGHTS: [i32; 4] = [0, 1, 10, 100];

/// Selects a move using the three-tier heuristic.
///
/// With `fallibility` set, each improving candidate in the scoring tier is
/// passed over with that probability. If every candidate is passed over the
/// first empty square is played. The win and block tiers are never weakened.
pub fn select<R>(board: &Board, mark: Mark, fallibility: Option<f64>, rng: &mut R) -> Position
where
    R: Rng + ?Sized,
{
    if let Some(pos) = rules::completing_move(board, mark) {
        trace!(position = %pos, "Taking winning square");
        return pos;
    }

    if let Some(pos) = rules::completing_move(board, mark.opponent()) {
        trace!(position = %pos, "Blocking opponent");
        return pos;
    }

    let mut scratch = board.clone();
    let mut best: Option<(Position, i32)> = None;
    for pos in board.empty_positions() {
        scratch.put(pos, mark);
        let value = score(&scratch, mark);
        scratch.clear(pos);

        let improves = best.is_none_or(|(_, best_value)| value > best_value);
        let accepted = match fallibility {
            Some(p) if improves => !rng.random_bool(p),
            _ => improves,
        };
        if accepted {
            best = Some((pos, value));
        }
    }

    match best {
        Some((pos, value)) => {
            trace!(position = %pos, score = value, "Best scoring square");
            pos
        }
        None => board
            .empty_positions()
            .next()
            .expect("heuristic strategy called on a full board"),
    }
}

/// Scores a position from `mark`'s point of view.
///
/// Every line contributes its weight for `mark`'s pieces and subtracts the
/// same weight for the opponent's.
pub fn score(board: &Board, mark: Mark) -> i32 {
    WinPattern::ALL
        .into_iter()
        .map(|pattern| {
            LINE_WEIGHTS[rules::line_count(board, pattern, mark)]
                - LINE_WEIGHTS[rules::line_count(board, pattern, mark.opponent())]
        })
        .sum()
}
