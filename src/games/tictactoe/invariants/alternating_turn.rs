//! Alternating turn invariant: marks alternate X, O, X, ... or O, X, O, ...

use super::super::GameState;
use super::Invariant;

/// Invariant: Marks alternate turns.
///
/// Consecutive history entries never share a mark, and while the game is
/// in progress the side to move is the opponent of the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();

        if history.windows(2).any(|w| w[0].mark == w[1].mark) {
            return false;
        }

        match history.last() {
            None => true,
            Some(last) if state.is_over() => state.to_move() == last.mark,
            Some(last) => state.to_move() == last.mark.opponent(),
        }
    }

    fn description() -> &'static str {
        "Marks alternate turns"
    }
}
