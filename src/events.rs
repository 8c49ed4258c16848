//! Events emitted to the presentation layer.

use crate::games::tictactoe::{GameOutcome, Mark};
use serde::{Deserialize, Serialize};

/// Something the presentation layer should render.
///
/// The engine never touches presentation objects; it only sends these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A mark was placed.
    CellUpdated {
        /// Cell index (0-8).
        index: usize,
        /// Mark placed.
        mark: Mark,
    },
    /// The computer started thinking; its move follows after the delay.
    AiThinking {
        /// Length of the pause in milliseconds.
        delay_ms: u64,
    },
    /// The game reached a win or a draw.
    ///
    /// Winning outcomes carry the completed line for the highlight.
    GameEnded {
        /// Final outcome.
        outcome: GameOutcome,
    },
    /// The board was wiped by a reset.
    BoardCleared,
}
