//! Tests for the async game session and its thinking delay.

use std::time::Duration;
use tictacpro::strategy::minimax;
use tictacpro::{
    FirstMover, GameConfig, GameEvent, GameOutcome, GameSession, Mark, MoveError, Position,
    TurnPhase,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

const DELAY: Duration = Duration::from_millis(1000);

fn config() -> GameConfig {
    GameConfig::default()
        .with_thinking_delay_ms(DELAY.as_millis() as u64)
        .with_seed(5)
}

fn drain(events: &mut UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn test_ai_replies_after_delay() {
    let (session, mut events) = GameSession::spawn(config()).unwrap();
    session.submit_human_move(0).await.unwrap();

    let snapshot = session.snapshot().await.unwrap();
    assert!(matches!(snapshot.phase, TurnPhase::AiThinking { .. }));
    assert_eq!(snapshot.board.count(Mark::O), 0);

    sleep(DELAY * 2).await;

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, TurnPhase::AwaitingHuman);
    assert_eq!(snapshot.board.count(Mark::O), 1);
    assert_eq!(
        drain(&mut events),
        vec![
            GameEvent::CellUpdated { index: 0, mark: Mark::X },
            GameEvent::AiThinking { delay_ms: 1000 },
            GameEvent::CellUpdated { index: 4, mark: Mark::O },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_thinking_cancels_ai_move() {
    let (session, mut events) = GameSession::spawn(config()).unwrap();
    session.submit_human_move(4).await.unwrap();
    sleep(DELAY / 2).await;
    session.reset().await.unwrap();

    sleep(DELAY * 3).await;

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.board.empty_positions().count(), 9);
    assert_eq!(snapshot.phase, TurnPhase::AwaitingHuman);
    assert_eq!(snapshot.outcome, GameOutcome::InProgress);

    let events = drain(&mut events);
    assert_eq!(events.last(), Some(&GameEvent::BoardCleared));
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::CellUpdated { mark: Mark::O, .. })),
        "AI moved after reset: {:?}",
        events
    );
}

#[tokio::test(start_paused = true)]
async fn test_human_rejected_while_ai_thinking() {
    let (session, _events) = GameSession::spawn(config()).unwrap();
    session.submit_human_move(0).await.unwrap();
    assert_eq!(session.submit_human_move(1).await, Err(MoveError::NotYourTurn));
    assert_eq!(session.submit_human_move(9).await, Err(MoveError::InvalidCellIndex(9)));

    sleep(DELAY * 2).await;
    assert_eq!(
        session.submit_human_move(0).await,
        Err(MoveError::CellOccupied(Position::TopLeft))
    );
}

#[tokio::test(start_paused = true)]
async fn test_optimal_human_against_minimax_draws() {
    let (session, mut events) = GameSession::spawn(config()).unwrap();

    let mut first = true;
    loop {
        let snapshot = session.snapshot().await.unwrap();
        match snapshot.phase {
            TurnPhase::Terminal => break,
            TurnPhase::AiThinking { .. } => sleep(DELAY).await,
            TurnPhase::AwaitingHuman => {
                let pos = if first {
                    Position::TopLeft
                } else {
                    minimax::select(&snapshot.board, Mark::X)
                };
                first = false;
                session.submit_position(pos).await.unwrap();
            }
        }
    }

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.outcome, GameOutcome::Draw);
    assert_eq!(snapshot.board.empty_positions().count(), 0);
    assert_eq!(
        drain(&mut events).last(),
        Some(&GameEvent::GameEnded { outcome: GameOutcome::Draw })
    );
    assert_eq!(session.submit_human_move(0).await, Err(MoveError::GameAlreadyOver));
}

#[tokio::test(start_paused = true)]
async fn test_ai_first_opening_is_delayed_and_replayed_after_reset() {
    let config = config().with_first_mover(FirstMover::Ai);
    let (session, _events) = GameSession::spawn(config).unwrap();

    assert!(matches!(
        session.snapshot().await.unwrap().phase,
        TurnPhase::AiThinking { .. }
    ));
    sleep(DELAY * 2).await;
    assert_eq!(session.snapshot().await.unwrap().board.count(Mark::O), 1);

    session.reset().await.unwrap();
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.board.empty_positions().count(), 9);
    assert!(matches!(snapshot.phase, TurnPhase::AiThinking { .. }));

    sleep(DELAY * 2).await;
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.board.count(Mark::O), 1);
    assert_eq!(snapshot.phase, TurnPhase::AwaitingHuman);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_serializes() {
    let (session, _events) = GameSession::spawn(config()).unwrap();
    session.submit_human_move(4).await.unwrap();
    let snapshot = session.snapshot().await.unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["human_mark"], "X");
    assert_eq!(json["outcome"], "InProgress");
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let config = GameConfig::default().with_fallibility(-0.5);
    assert!(GameSession::spawn(config).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_closes_session() {
    let (session, mut events) = GameSession::spawn(config()).unwrap();
    session.submit_human_move(0).await.unwrap();
    session.shutdown();

    sleep(DELAY * 2).await;
    assert_eq!(session.submit_human_move(1).await, Err(MoveError::SessionClosed));
    assert_eq!(session.snapshot().await.unwrap_err(), MoveError::SessionClosed);

    let events = drain(&mut events);
    assert_eq!(events.len(), 2, "no AI move after shutdown: {:?}", events);
}
