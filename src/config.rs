//! Game configuration: who moves first, which marks, which opponent.

use crate::games::tictactoe::Mark;
use crate::strategy::{Strategy, StrategyKind};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Which side plays the first move of each game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstMover {
    /// The human opens.
    #[default]
    Human,
    /// The computer opens.
    Ai,
}

/// How the computer plays its opening move when it moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Opening {
    /// The opening goes through the thinking delay like any other AI move.
    #[default]
    Scheduled,
    /// The strategy plays the opening instantly.
    Immediate,
    /// A uniformly random square, played instantly.
    Random,
    /// A random square other than the center, played instantly.
    RandomOffCenter,
}

/// Configuration for one game session.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Side that opens each game.
    first_mover: FirstMover,

    /// Mark the human plays; the computer takes the other one.
    human_mark: Mark,

    /// Computer opponent.
    strategy: StrategyKind,

    /// Pause before each scheduled computer move, in milliseconds.
    thinking_delay_ms: u64,

    /// Probability that the heuristic passes over an improving square.
    #[setters(strip_option)]
    fallibility: Option<f64>,

    /// Opening policy when the computer moves first.
    opening: Opening,

    /// Seed for the opponent's random choices; entropy when unset.
    #[setters(strip_option)]
    seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_mover: FirstMover::Human,
            human_mark: Mark::X,
            strategy: StrategyKind::Minimax,
            thinking_delay_ms: 1000,
            fallibility: None,
            opening: Opening::Scheduled,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            strategy = %config.strategy,
            first_mover = %config.first_mover,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Fails if the fallibility is not a probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(p) = self.fallibility
            && !(0.0..=1.0).contains(&p)
        {
            return Err(ConfigError::new(format!(
                "fallibility must be between 0 and 1, got {}",
                p
            )));
        }
        Ok(())
    }

    /// Mark the computer plays.
    pub fn ai_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// Mark that opens each game.
    pub fn first_mark(&self) -> Mark {
        match self.first_mover {
            FirstMover::Human => self.human_mark,
            FirstMover::Ai => self.ai_mark(),
        }
    }

    /// Thinking delay as a duration.
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    /// The configured strategy with its fallibility applied.
    pub fn build_strategy(&self) -> Strategy {
        Strategy::from_kind(self.strategy, self.fallibility)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.first_mark(), Mark::X);
        assert_eq!(config.ai_mark(), Mark::O);
        assert_eq!(config.thinking_delay(), Duration::from_secs(1));
        assert_eq!(config.build_strategy(), Strategy::Minimax);
    }

    #[test]
    fn test_ai_first_with_human_x_opens_with_o() {
        let config = GameConfig::default()
            .with_first_mover(FirstMover::Ai)
            .with_human_mark(Mark::X);
        assert_eq!(config.first_mark(), Mark::O);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            strategy = "medium"
            first_mover = "ai"
            fallibility = 0.2
            opening = "random-off-center"
            "#,
        )
        .unwrap();
        assert_eq!(*config.strategy(), StrategyKind::Heuristic);
        assert_eq!(*config.first_mover(), FirstMover::Ai);
        assert_eq!(*config.opening(), Opening::RandomOffCenter);
        assert_eq!(*config.thinking_delay_ms(), 1000);
        assert_eq!(
            config.build_strategy(),
            Strategy::Heuristic { fallibility: Some(0.2) }
        );
    }

    #[test]
    fn test_fallibility_out_of_range_rejected() {
        let config = GameConfig::default().with_fallibility(1.5);
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("fallibility"));
    }
}
