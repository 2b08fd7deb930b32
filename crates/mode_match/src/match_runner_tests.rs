use super::*;
use async_trait::async_trait;
use client_core::{Prediction, ServiceError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers from a fixed script, recording the mode of every request
struct ScriptedService {
    actions: Mutex<VecDeque<Result<&'static str, u16>>>,
    modes: Mutex<Vec<Mode>>,
}

impl ScriptedService {
    fn new(actions: &[Result<&'static str, u16>]) -> Self {
        Self {
            actions: Mutex::new(actions.iter().cloned().collect()),
            modes: Mutex::new(Vec::new()),
        }
    }

    fn modes(&self) -> Vec<Mode> {
        self.modes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MoveService for ScriptedService {
    async fn predict(&self, mode: Mode, _fen: &str) -> Result<Prediction, ServiceError> {
        self.modes.lock().unwrap().push(mode);
        match self.actions.lock().unwrap().pop_front() {
            Some(Ok(action)) => Ok(Prediction {
                action: action.to_string(),
                confidence: Some(0.5),
            }),
            Some(Err(status)) => Err(ServiceError::Status(status)),
            None => Err(ServiceError::Timeout),
        }
    }

    async fn add_history(&self, _record: &client_core::HistoryRecord) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Always plays the first legal move it finds
struct FirstLegal;

#[async_trait]
impl MoveService for FirstLegal {
    async fn predict(&self, _mode: Mode, fen: &str) -> Result<Prediction, ServiceError> {
        let board = BoardState::from_fen(fen).map_err(|e| ServiceError::Decode(e.to_string()))?;
        let action = client_core::cozy_chess::Square::ALL
            .into_iter()
            .find_map(|from| {
                board
                    .legal_destinations(from)
                    .first()
                    .map(|to| format!("{from}{to}"))
            })
            .ok_or(ServiceError::Status(404))?;
        Ok(Prediction {
            action,
            confidence: Some(0.25),
        })
    }

    async fn add_history(&self, _record: &client_core::HistoryRecord) -> Result<(), ServiceError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_hard_mates_easy() {
    let service = ScriptedService::new(&[Ok("f2f3"), Ok("e7e5"), Ok("g2g4"), Ok("d8h4")]);

    let record = play_game(&service, PlayerColor::White, 100).await;

    assert_eq!(record.end, GameEnd::Checkmate { winner: Mode::Hard });
    assert_eq!(record.result(), Some(GameResult::Loss));
    assert_eq!(record.history(), "f2f3,e7e5,g2g4,d8h4");
    assert_eq!(
        service.modes(),
        vec![Mode::Easy, Mode::Hard, Mode::Easy, Mode::Hard]
    );

    // Hard's confidence is negated
    let confidences: Vec<_> = record.plies.iter().map(|p| p.confidence).collect();
    assert_eq!(confidences, vec![Some(0.5), Some(-0.5), Some(0.5), Some(-0.5)]);
}

#[tokio::test]
async fn test_easy_as_black_gets_black_moves() {
    let service = ScriptedService::new(&[Ok("f2f3"), Ok("e7e5"), Ok("g2g4"), Ok("d8h4")]);

    let record = play_game(&service, PlayerColor::Black, 100).await;

    assert_eq!(record.end, GameEnd::Checkmate { winner: Mode::Easy });
    assert_eq!(record.result(), Some(GameResult::Win));
    assert_eq!(service.modes()[0], Mode::Hard);
    assert_eq!(record.plies[1].mode, Mode::Easy);
}

#[tokio::test]
async fn test_rejected_action_ends_game() {
    let service = ScriptedService::new(&[Ok("e2e4"), Ok("e2e4")]);

    let record = play_game(&service, PlayerColor::White, 100).await;

    assert_eq!(
        record.end,
        GameEnd::Rejected {
            action: "e2e4".to_string()
        }
    );
    assert_eq!(record.plies.len(), 1);
    assert_eq!(record.result(), None);
}

#[tokio::test]
async fn test_request_failure_ends_game() {
    let service = ScriptedService::new(&[Ok("d2d4"), Err(500)]);

    let record = play_game(&service, PlayerColor::White, 100).await;

    assert!(matches!(record.end, GameEnd::RequestFailed { .. }));
    assert_eq!(record.plies.len(), 1);
}

#[tokio::test]
async fn test_ply_cap() {
    let record = play_game(&FirstLegal, PlayerColor::White, 6).await;

    assert_eq!(record.end, GameEnd::PlyCap);
    assert_eq!(record.plies.len(), 6);
    assert_eq!(record.result(), Some(GameResult::Draw));
}

#[tokio::test]
async fn test_run_match_alternates_colors() {
    let runner = MatchRunner::new(MatchConfig {
        num_games: 4,
        max_plies: 4,
        concurrency: 2,
        alternate_colors: true,
    });

    let records = runner.run_match(Arc::new(FirstLegal)).await;

    let colors: Vec<_> = records.iter().map(|r| r.easy_color).collect();
    assert_eq!(
        colors,
        vec![
            PlayerColor::White,
            PlayerColor::Black,
            PlayerColor::White,
            PlayerColor::Black
        ]
    );
    assert!(records.iter().all(|r| r.end == GameEnd::PlyCap));
}

#[test]
fn test_fixed_colors() {
    let runner = MatchRunner::new(MatchConfig {
        alternate_colors: false,
        ..Default::default()
    });
    assert_eq!(runner.easy_color(0), PlayerColor::White);
    assert_eq!(runner.easy_color(1), PlayerColor::White);
}
