//! Named board positions for tic-tac-toe moves.

use super::action::MoveError;
use super::types::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the tic-tac-toe board (0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Parses player input: a cell number 1-9 or a position label.
    ///
    /// Labels match case-insensitively and ignore the hyphen, so
    /// `"top left"` and `"Top-left"` both work.
    #[instrument]
    pub fn from_input(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }

        let normalize = |text: &str| {
            text.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        };
        let wanted = normalize(s);
        if wanted.is_empty() {
            return None;
        }
        <Position as strum::IntoEnumIterator>::iter().find(|pos| normalize(pos.label()) == wanted)
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        match self {
            Position::TopLeft => 0,
            Position::TopCenter => 1,
            Position::TopRight => 2,
            Position::MiddleLeft => 3,
            Position::Center => 4,
            Position::MiddleRight => 5,
            Position::BottomLeft => 6,
            Position::BottomCenter => 7,
            Position::BottomRight => 8,
        }
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from board index, rejecting anything outside 0-8.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidCellIndex`] for indices of 9 and above.
    pub fn try_from_index(index: usize) -> Result<Self, MoveError> {
        Self::from_index(index).ok_or(MoveError::InvalidCellIndex(index))
    }

    /// Filters positions by board state - returns only empty squares.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        board.empty_positions().collect()
    }
}

impl TryFrom<usize> for Position {
    type Error = MoveError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::try_from_index(index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
