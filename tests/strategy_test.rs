//! Tests for the computer strategies against exhaustive opponents.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use tictacpro::strategy::{heuristic, minimax};
use tictacpro::{Board, GameOutcome, GameState, Mark, Position, Strategy};


/// Plays minimax as `ai` against every possible sequence of opponent moves
/// and returns the worst outcome for the AI seen.
fn worst_outcome_for(
    state: &GameState,
    ai: Mark,
    cache: &mut HashMap<Board, Position>,
) -> GameOutcome {
    if state.is_over() {
        return state.outcome();
    }

    if state.to_move() == ai {
        let pos = *cache
            .entry(state.board().clone())
            .or_insert_with(|| minimax::select(state.board(), ai));
        let mut next = state.clone();
        next.place(pos).unwrap();
        return worst_outcome_for(&next, ai, cache);
    }

    let mut worst = GameOutcome::Winner {
        mark: ai,
        pattern: tictacpro::WinPattern::TopRow,
    };
    for pos in state.board().empty_positions() {
        let mut next = state.clone();
        next.place(pos).unwrap();
        let outcome = worst_outcome_for(&next, ai, cache);
        if outcome.winner() == Some(ai.opponent()) {
            return outcome;
        }
        if outcome.is_draw() {
            worst = outcome;
        }
    }
    worst
}

#[test]
fn test_minimax_never_loses_as_second_player() {
    let mut cache = HashMap::new();
    let outcome = worst_outcome_for(&GameState::new(Mark::X), Mark::O, &mut cache);
    assert_ne!(outcome.winner(), Some(Mark::X), "minimax lost: {:?}", outcome);
}

#[test]
fn test_minimax_never_loses_as_first_player() {
    let mut cache = HashMap::new();
    let outcome = worst_outcome_for(&GameState::new(Mark::X), Mark::X, &mut cache);
    assert_ne!(outcome.winner(), Some(Mark::O), "minimax lost: {:?}", outcome);
}

#[test]
fn test_minimax_self_play_draws() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut state = GameState::new(Mark::X);
    while !state.is_over() {
        let pos = Strategy::Minimax.select_move(state.board(), state.to_move(), &mut rng);
        state.place(pos).unwrap();
    }
    assert_eq!(state.outcome(), GameOutcome::Draw);
    assert_eq!(state.history().len(), 9);
}

#[test]
fn test_human_corner_against_minimax_draws() {
    // Human X opens in the corner and then plays perfectly too.
    let mut rng = StdRng::seed_from_u64(0);
    let mut state = GameState::new(Mark::X);
    state.place(Position::TopLeft).unwrap();
    while !state.is_over() {
        let pos = Strategy::Minimax.select_move(state.board(), state.to_move(), &mut rng);
        state.place(pos).unwrap();
    }
    assert_eq!(state.outcome(), GameOutcome::Draw);
}

#[test]
fn test_heuristic_prefers_own_win_to_block() {
    let mut rng = StdRng::seed_from_u64(0);
    let b = "XX.OO....".parse::<Board>().unwrap();
    let pos = Strategy::Heuristic { fallibility: None }.select_move(&b, Mark::O, &mut rng);
    assert_eq!(pos, Position::MiddleRight);
}

#[test]
fn test_heuristic_blocks_open_pair() {
    let mut rng = StdRng::seed_from_u64(0);
    let b = "XX..O....".parse::<Board>().unwrap();
    let pos = Strategy::Heuristic { fallibility: None }.select_move(&b, Mark::O, &mut rng);
    assert_eq!(pos, Position::TopRight);
}

#[test]
fn test_win_now_for_heuristic_and_minimax() {
    let mut rng = StdRng::seed_from_u64(0);
    let b = "XX.......".parse::<Board>().unwrap();
    for strategy in [Strategy::Heuristic { fallibility: None }, Strategy::Minimax] {
        assert_eq!(
            strategy.select_move(&b, Mark::X, &mut rng),
            Position::TopRight,
            "{:?}",
            strategy
        );
    }
}

#[test]
fn test_fallible_heuristic_still_wins_and_blocks() {
    let mut rng = StdRng::seed_from_u64(3);
    let strategy = Strategy::Heuristic { fallibility: Some(1.0) };
    for _ in 0..20 {
        assert_eq!(
            strategy.select_move(&"XX.OO....".parse().unwrap(), Mark::O, &mut rng),
            Position::MiddleRight
        );
        assert_eq!(
            strategy.select_move(&"XX..O....".parse().unwrap(), Mark::O, &mut rng),
            Position::TopRight
        );
    }
}

#[test]
fn test_always_fallible_heuristic_plays_first_empty() {
    let mut rng = StdRng::seed_from_u64(3);
    let b = "X...O....".parse::<Board>().unwrap();
    assert_eq!(
        heuristic::select(&b, Mark::X, Some(1.0), &mut rng),
        Position::TopCenter
    );
}

#[test]
fn test_random_only_picks_empty_squares() {
    let mut rng = StdRng::seed_from_u64(7);
    let b = "XOX.O.X..".parse::<Board>().unwrap();
    for _ in 0..200 {
        let pos = Strategy::Random.select_move(&b, Mark::O, &mut rng);
        assert!(b.is_empty(pos), "picked occupied {}", pos);
    }
}

#[test]
fn test_every_strategy_finishes_a_game_legally() {
    let strategies = [
        Strategy::Random,
        Strategy::Heuristic { fallibility: None },
        Strategy::Heuristic { fallibility: Some(0.2) },
        Strategy::Minimax,
    ];
    let mut rng = StdRng::seed_from_u64(11);
    for x in strategies {
        for o in strategies {
            let mut state = GameState::new(Mark::X);
            while !state.is_over() {
                let mark = state.to_move();
                let strategy = if mark == Mark::X { x } else { o };
                let pos = strategy.select_move(state.board(), mark, &mut rng);
                state.place(pos).unwrap();
            }
            assert!(state.outcome().is_terminal());
        }
    }
}
