//! Command-line interface for tictacpro.

use clap::{Parser, Subcommand};
use tictacpro::{FirstMover, GameConfig, Mark, Opening, StrategyKind};

/// Tictacpro - tic-tac-toe against a computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictacpro")]
#[command(about = "Play tic-tac-toe against random, heuristic or minimax opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on the terminal
    Play {
        #[command(flatten)]
        args: PlayArgs,
    },

    /// Pit two strategies against each other and report a tally
    Simulate {
        /// Strategy playing X (random, heuristic, minimax)
        #[arg(long, default_value = "minimax")]
        x: StrategyKind,

        /// Strategy playing O (random, heuristic, minimax)
        #[arg(long, default_value = "random")]
        o: StrategyKind,

        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Fallibility applied to heuristic players
        #[arg(long)]
        fallibility: Option<f64>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Options for interactive play.
///
/// Flags override values loaded from `--config`.
#[derive(clap::Args, Debug)]
pub struct PlayArgs {
    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Computer opponent (random/easy, heuristic/medium, minimax/unbeatable)
    #[arg(short, long)]
    pub strategy: Option<StrategyKind>,

    /// Who opens each game (human, ai)
    #[arg(long)]
    pub first_mover: Option<FirstMover>,

    /// Mark the human plays (x, o)
    #[arg(long)]
    pub human_mark: Option<Mark>,

    /// Computer thinking delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Probability that the heuristic skips an improving square
    #[arg(long)]
    pub fallibility: Option<f64>,

    /// Computer opening when it moves first
    #[arg(long)]
    pub opening: Option<Opening>,

    /// RNG seed for reproducible opponents
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print events as JSON lines instead of drawing the board
    #[arg(long)]
    pub json: bool,
}

impl PlayArgs {
    /// Applies the command-line overrides on top of `base`.
    pub fn apply(&self, base: GameConfig) -> GameConfig {
        let mut config = base;
        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        if let Some(first_mover) = self.first_mover {
            config = config.with_first_mover(first_mover);
        }
        if let Some(mark) = self.human_mark {
            config = config.with_human_mark(mark);
        }
        if let Some(delay) = self.delay_ms {
            config = config.with_thinking_delay_ms(delay);
        }
        if let Some(p) = self.fallibility {
            config = config.with_fallibility(p);
        }
        if let Some(opening) = self.opening {
            config = config.with_opening(opening);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_flags_override_config() {
        let cli = Cli::try_parse_from([
            "tictacpro",
            "play",
            "--strategy",
            "easy",
            "--human-mark",
            "o",
            "--delay-ms",
            "0",
        ])
        .unwrap();
        let Command::Play { args } = cli.command else {
            panic!("expected play command");
        };
        let config = args.apply(GameConfig::default());
        assert_eq!(*config.strategy(), StrategyKind::Random);
        assert_eq!(*config.human_mark(), Mark::O);
        assert_eq!(*config.thinking_delay_ms(), 0);
        assert_eq!(*config.first_mover(), FirstMover::Human);
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::try_parse_from(["tictacpro", "simulate", "--games", "10"]).unwrap();
        match cli.command {
            Command::Simulate { x, o, games, .. } => {
                assert_eq!(x, StrategyKind::Minimax);
                assert_eq!(o, StrategyKind::Random);
                assert_eq!(games, 10);
            }
            Command::Play { .. } => panic!("expected simulate command"),
        }
    }
}
