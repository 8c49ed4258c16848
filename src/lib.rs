//! Tictacpro library - tic-tac-toe against a computer opponent
//!
//! The engine is independent of any presentation layer: it receives cell
//! indices and reset requests, and reports back through [`GameEvent`]s.
//!
//! # Architecture
//!
//! - **Games**: Board, outcome detection and the contract-checked game state
//! - **Strategy**: Random, heuristic and minimax opponents
//! - **Controller**: Synchronous turn state machine with cancellable AI moves
//! - **Session**: Tokio actor that runs the thinking delay
//!
//! # Example
//!
//! ```no_run
//! use tictacpro::{GameConfig, GameSession, StrategyKind};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default().with_strategy(StrategyKind::Heuristic);
//! let (session, mut events) = GameSession::spawn(config)?;
//!
//! session.submit_human_move(4).await?;
//! while let Some(event) = events.recv().await {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod events;
mod games;
mod session;

pub mod strategy;

// Crate-level exports - Configuration
pub use config::{ConfigError, FirstMover, GameConfig, Opening};

// Crate-level exports - Turn control
pub use controller::{AiPlan, PendingMove, Ticket, TurnController, TurnPhase};

// Crate-level exports - Events
pub use events::GameEvent;

// Crate-level exports - Session management
pub use session::{GameSession, Snapshot};

// Crate-level exports - Strategies
pub use strategy::{Strategy, StrategyKind};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AlternatingTurnInvariant, Board, Contract, GameInvariants, GameNotOver, GameOutcome,
    GameState, Invariant, InvariantSet, InvariantViolation, Mark, MonotonicBoardInvariant, Move,
    MoveError, ParseBoardError, PlacementContract, Position, Square, SquareIsEmpty, WinPattern,
    rules,
};
