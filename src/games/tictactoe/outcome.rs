//! Game outcomes and the fixed set of winning lines.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// One of the eight lines that win the game when filled with a single mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum WinPattern {
    /// Cells 0, 1, 2.
    TopRow,
    /// Cells 3, 4, 5.
    MiddleRow,
    /// Cells 6, 7, 8.
    BottomRow,
    /// Cells 0, 3, 6.
    LeftColumn,
    /// Cells 1, 4, 7.
    CenterColumn,
    /// Cells 2, 5, 8.
    RightColumn,
    /// Cells 0, 4, 8.
    MainDiagonal,
    /// Cells 2, 4, 6.
    AntiDiagonal,
}

impl WinPattern {
    /// All patterns in scan order. Detection reports the first match.
    pub const ALL: [WinPattern; 8] = [
        WinPattern::TopRow,
        WinPattern::MiddleRow,
        WinPattern::BottomRow,
        WinPattern::LeftColumn,
        WinPattern::CenterColumn,
        WinPattern::RightColumn,
        WinPattern::MainDiagonal,
        WinPattern::AntiDiagonal,
    ];

    /// The three positions making up this line.
    pub const fn cells(self) -> [Position; 3] {
        use Position::*;
        match self {
            WinPattern::TopRow => [TopLeft, TopCenter, TopRight],
            WinPattern::MiddleRow => [MiddleLeft, Center, MiddleRight],
            WinPattern::BottomRow => [BottomLeft, BottomCenter, BottomRight],
            WinPattern::LeftColumn => [TopLeft, MiddleLeft, BottomLeft],
            WinPattern::CenterColumn => [TopCenter, Center, BottomCenter],
            WinPattern::RightColumn => [TopRight, MiddleRight, BottomRight],
            WinPattern::MainDiagonal => [TopLeft, Center, BottomRight],
            WinPattern::AntiDiagonal => [TopRight, Center, BottomLeft],
        }
    }

    /// First endpoint of the line, where a highlight stroke starts.
    pub fn start(self) -> Position {
        self.cells()[0]
    }

    /// Last endpoint of the line, where a highlight stroke ends.
    pub fn end(self) -> Position {
        self.cells()[2]
    }
}

/// State of a game with respect to winning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No line completed and empty squares remain.
    InProgress,
    /// A mark filled a line.
    Winner {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        pattern: WinPattern,
    },
    /// Board full with no completed line.
    Draw,
}

impl GameOutcome {
    /// Returns true once the game can accept no further moves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameOutcome::Winner { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::Winner { mark, .. } => write!(f, "{} wins!", mark),
            GameOutcome::Draw => write!(f, "It's a tie!"),
        }
    }
}
