//! Uniformly random move selection.

use crate::games::tictactoe::{Board, Position};
use rand::Rng;

/// Picks an empty square uniformly at random.
///
/// A single candidate is returned without drawing from `rng`.
pub fn select<R>(board: &Board, rng: &mut R) -> Position
where
    R: Rng + ?Sized,
{
    pick(&Position::valid_moves(board), rng).expect("random strategy called on a full board")
}

/// Picks an empty square at random, avoiding `excluded` when possible.
///
/// Falls back to every empty square if the exclusions leave none.
pub fn select_excluding<R>(board: &Board, excluded: &[Position], rng: &mut R) -> Position
where
    R: Rng + ?Sized,
{
    let preferred: Vec<Position> = board
        .empty_positions()
        .filter(|pos| !excluded.contains(pos))
        .collect();
    pick(&preferred, rng).unwrap_or_else(|| select(board, rng))
}

fn pick<R>(candidates: &[Position], rng: &mut R) -> Option<Position>
where
    R: Rng + ?Sized,
{
    match candidates {
        [] => None,
        [only] => Some(*only),
        _ => Some(candidates[rng.random_range(0..candidates.len())]),
    }
}
