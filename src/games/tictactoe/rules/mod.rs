//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are separated from board
//! storage so strategies can evaluate hypothetical positions the same way
//! the turn controller evaluates real ones.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{completing_move, detect_outcome, line_count, winning_pattern};
