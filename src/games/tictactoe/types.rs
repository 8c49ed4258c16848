//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A player's token.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// The X token.
    X,
    /// The O token.
    O,
}

impl Mark {
    /// Returns the other player's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Unplayed square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored row-major: 0,1,2 / 3,4,5 / 6,7,8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from optional marks, `None` meaning empty.
    pub fn from_marks(marks: [Option<Mark>; 9]) -> Self {
        Self {
            squares: marks.map(|m| m.map_or(Square::Empty, Square::Occupied)),
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Places a mark on an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::CellOccupied`] if the square already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        self.squares[pos.to_index()] = Square::Occupied(mark);
        Ok(())
    }

    /// Writes a mark without the occupancy check. Lookahead only.
    pub(crate) fn put(&mut self, pos: Position, mark: Mark) {
        self.squares[pos.to_index()] = Square::Occupied(mark);
    }

    /// Clears a square. Only lookahead code rolls back its own placements.
    pub(crate) fn clear(&mut self, pos: Position) {
        self.squares[pos.to_index()] = Square::Empty;
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Iterates over the empty positions in index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|&pos| self.is_empty(pos))
    }

    /// Counts squares holding the given mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a [`Board`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board '{}': {}", input, reason)]
pub struct ParseBoardError {
    /// Text that failed to parse.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

/// Parses nine cells in row-major order.
///
/// `X` and `O` (any case) are marks; `.`, `_` and `-` are empty squares.
/// Whitespace and `|` separators are ignored, so `"XO.|.X.|..O"` and
/// `"XO..X...O"` describe the same board.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: &'static str| ParseBoardError {
            input: s.to_string(),
            reason,
        };

        let mut marks = [None; 9];
        let mut count = 0;
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let cell = match c {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | '-' => None,
                _ => return Err(error("unexpected character")),
            };
            let slot = marks
                .get_mut(count)
                .ok_or_else(|| error("more than nine cells"))?;
            *slot = cell;
            count += 1;
        }

        if count != 9 {
            return Err(error("fewer than nine cells"));
        }
        Ok(Self::from_marks(marks))
    }
}
