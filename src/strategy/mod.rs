//! Computer opponents.
//!
//! The three difficulty levels are variants of one [`Strategy`] enum rather
//! than separate player types, so a controller is parameterized by data.

pub mod heuristic;
pub mod minimax;
pub mod random;

use crate::games::tictactoe::{Board, GameOutcome, Mark, Position, rules};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Strategy names accepted by configuration files and the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StrategyKind {
    /// Uniformly random empty square ("easy").
    #[serde(alias = "easy")]
    #[strum(to_string = "random", serialize = "easy")]
    Random,
    /// Win, block, else best single-ply score ("medium").
    #[serde(alias = "medium")]
    #[strum(to_string = "heuristic", serialize = "medium")]
    Heuristic,
    /// Exhaustive game-tree search ("unbeatable").
    #[default]
    #[serde(alias = "unbeatable")]
    #[strum(to_string = "minimax", serialize = "unbeatable")]
    Minimax,
}

/// A move-selection strategy for the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Pick any empty square with equal probability.
    Random,
    /// Three-tier single-ply heuristic.
    Heuristic {
        /// Probability of passing over an improving candidate in the
        /// scoring tier. `None` plays the heuristic at full strength.
        fallibility: Option<f64>,
    },
    /// Full-depth minimax; never loses.
    #[default]
    Minimax,
}

impl Strategy {
    /// Builds a strategy from its configured name.
    ///
    /// `fallibility` only affects [`StrategyKind::Heuristic`].
    pub fn from_kind(kind: StrategyKind, fallibility: Option<f64>) -> Self {
        match kind {
            StrategyKind::Random => Strategy::Random,
            StrategyKind::Heuristic => Strategy::Heuristic { fallibility },
            StrategyKind::Minimax => Strategy::Minimax,
        }
    }

    /// The configuration name of this strategy.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Random => StrategyKind::Random,
            Strategy::Heuristic { .. } => StrategyKind::Heuristic,
            Strategy::Minimax => StrategyKind::Minimax,
        }
    }

    /// Chooses a square for `mark` on `board`.
    ///
    /// # Panics
    ///
    /// Panics if the board is already won or full. Callers only ask for a
    /// move while the game is in progress.
    #[instrument(skip(self, board, rng), fields(strategy = %self.kind()))]
    pub fn select_move<R>(&self, board: &Board, mark: Mark, rng: &mut R) -> Position
    where
        R: Rng + ?Sized,
    {
        assert_eq!(
            rules::detect_outcome(board),
            GameOutcome::InProgress,
            "strategy asked to move on a finished board"
        );

        let pos = match self {
            Strategy::Random => random::select(board, rng),
            Strategy::Heuristic { fallibility } => {
                heuristic::select(board, mark, *fallibility, rng)
            }
            Strategy::Minimax => minimax::select(board, mark),
        };
        debug!(position = %pos, "Strategy chose position");
        pos
    }
}
