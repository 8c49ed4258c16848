//! Tictacpro - terminal front end
//!
//! Interactive play against the computer, or strategy-vs-strategy runs.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tictacpro::{
    GameConfig, GameEvent, GameOutcome, GameSession, GameState, Mark, MoveError, Position,
    Strategy, StrategyKind,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { args } => run_play(args).await,
        Command::Simulate {
            x,
            o,
            games,
            fallibility,
            seed,
        } => run_simulate(x, o, games, fallibility, seed),
    }
}

/// Interactive game on stdin/stdout.
#[instrument(skip_all)]
async fn run_play(args: PlayArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    let config = args.apply(base);
    info!(?config, "Starting interactive game");

    let (session, mut events) = GameSession::spawn(config)?;
    let human = session.snapshot().await?.human_mark;

    if !args.json {
        println!(
            "You play {}. Enter a square (1-9 or e.g. 'center'), 'r' to reset, 'q' to quit.",
            human
        );
        println!("{}", session.snapshot().await?.board.display());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                render_event(&session, &event, args.json).await?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                let input = line.trim();
                match input {
                    "" => continue,
                    "q" | "quit" => break,
                    "r" | "reset" => session.reset().await?,
                    _ => match Position::from_input(input) {
                        Some(pos) => report(session.submit_position(pos).await, args.json)?,
                        // Out-of-range numbers go to the session so it reports the index.
                        None => match input.parse::<usize>() {
                            Ok(n) if n >= 1 => {
                                report(session.submit_human_move(n - 1).await, args.json)?
                            }
                            _ => println!("Unrecognized input '{}'", input),
                        },
                    },
                }
            }
        }
    }

    info!("Leaving game");
    Ok(())
}

/// Prints a rejected move. Session shutdown is fatal.
fn report(result: Result<(), MoveError>, json: bool) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(MoveError::SessionClosed) => Err(MoveError::SessionClosed.into()),
        Err(e) if json => {
            println!("{}", serde_json::json!({ "type": "error", "message": e.to_string() }));
            Ok(())
        }
        Err(e) => {
            println!("{}", e);
            Ok(())
        }
    }
}

async fn render_event(session: &GameSession, event: &GameEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match event {
        GameEvent::CellUpdated { .. } => {
            println!("{}", session.snapshot().await?.board.display());
        }
        GameEvent::AiThinking { .. } => println!("Computer is thinking..."),
        GameEvent::GameEnded { outcome } => {
            match outcome {
                GameOutcome::Winner { pattern, .. } => {
                    println!("{} ({} to {})", outcome, pattern.start(), pattern.end())
                }
                _ => println!("{}", outcome),
            }
            println!("Enter 'r' to play again or 'q' to quit.");
        }
        GameEvent::BoardCleared => {
            println!("New game.");
            println!("{}", session.snapshot().await?.board.display());
        }
    }
    Ok(())
}

/// Plays `games` games between two strategies and prints a tally.
#[instrument]
fn run_simulate(
    x: StrategyKind,
    o: StrategyKind,
    games: u32,
    fallibility: Option<f64>,
    seed: Option<u64>,
) -> Result<()> {
    if let Some(p) = fallibility
        && !(0.0..=1.0).contains(&p)
    {
        anyhow::bail!("fallibility must be between 0 and 1, got {}", p);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let x_strategy = Strategy::from_kind(x, fallibility);
    let o_strategy = Strategy::from_kind(o, fallibility);

    let (mut x_wins, mut o_wins, mut draws) = (0u32, 0u32, 0u32);
    for game in 0..games {
        let mut state = GameState::new(Mark::X);
        while !state.is_over() {
            let mark = state.to_move();
            let strategy = if mark == Mark::X { &x_strategy } else { &o_strategy };
            let pos = strategy.select_move(state.board(), mark, &mut rng);
            state.place(pos)?;
        }

        debug!(game, outcome = %state.outcome(), "Simulated game");
        match state.outcome() {
            GameOutcome::Winner { mark: Mark::X, .. } => x_wins += 1,
            GameOutcome::Winner { mark: Mark::O, .. } => o_wins += 1,
            GameOutcome::Draw => draws += 1,
            GameOutcome::InProgress => warn!(game, "Simulation ended without an outcome"),
        }
    }

    info!(x_wins, o_wins, draws, "Simulation finished");
    println!("X ({}) wins: {}", x, x_wins);
    println!("O ({}) wins: {}", o, o_wins);
    println!("Draws: {}", draws);
    Ok(())
}
