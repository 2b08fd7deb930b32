//! Match runner for playing the service's modes against each other

use client_core::{BoardState, Mode, MoveService, Outcome, PlayerColor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::score::{GameResult, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Plies per game before it is scored as a draw
    pub max_plies: u32,
    /// Games in flight at once
    pub concurrency: usize,
    /// Whether easy alternates between white and black
    pub alternate_colors: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_plies: 300,
            concurrency: 10,
            alternate_colors: true,
        }
    }
}

/// One half-move as the service produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ply {
    pub mode: Mode,
    pub action: String,
    /// Reported confidence, negated for hard so both modes share one axis
    pub confidence: Option<f64>,
}

/// Why a game stopped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEnd {
    Checkmate { winner: Mode },
    Draw { reason: String },
    Rejected { action: String },
    RequestFailed { error: String },
    PlyCap,
}

/// A played game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub easy_color: PlayerColor,
    pub plies: Vec<Ply>,
    pub end: GameEnd,
}

impl GameRecord {
    /// Result from easy's perspective; `None` for aborted games
    pub fn result(&self) -> Option<GameResult> {
        match &self.end {
            GameEnd::Checkmate { winner: Mode::Easy } => Some(GameResult::Win),
            GameEnd::Checkmate { winner: Mode::Hard } => Some(GameResult::Loss),
            GameEnd::Draw { .. } | GameEnd::PlyCap => Some(GameResult::Draw),
            GameEnd::Rejected { .. } | GameEnd::RequestFailed { .. } => None,
        }
    }

    /// Comma-joined actions, the same shape as a submitted history
    pub fn history(&self) -> String {
        self.plies
            .iter()
            .map(|ply| ply.action.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Runs matches between the two modes of one service
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Side easy plays in game `game_num`
    pub fn easy_color(&self, game_num: u32) -> PlayerColor {
        if !self.config.alternate_colors || game_num % 2 == 0 {
            PlayerColor::White
        } else {
            PlayerColor::Black
        }
    }

    /// Play every game, at most `concurrency` at a time.
    ///
    /// Records come back in game order.
    pub async fn run_match(&self, service: Arc<dyn MoveService>) -> Vec<GameRecord> {
        let limit = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut games = JoinSet::new();

        for game_num in 0..self.config.num_games {
            let easy_color = self.easy_color(game_num);
            let service = Arc::clone(&service);
            let limit = Arc::clone(&limit);
            let max_plies = self.config.max_plies;

            games.spawn(async move {
                // The semaphore is never closed
                let _permit = limit.acquire_owned().await.ok();
                let record = play_game(service.as_ref(), easy_color, max_plies).await;
                (game_num, record)
            });
        }

        let mut finished = Vec::with_capacity(self.config.num_games as usize);
        let mut tally = MatchResult::new();
        while let Some(joined) = games.join_next().await {
            match joined {
                Ok((game_num, record)) => {
                    tally.record(record.result());
                    info!(
                        game = game_num + 1,
                        of = self.config.num_games,
                        easy = %record.easy_color,
                        plies = record.plies.len(),
                        end = ?record.end,
                        "game finished (easy {}-{}-{})",
                        tally.wins,
                        tally.losses,
                        tally.draws
                    );
                    finished.push((game_num, record));
                }
                Err(e) => warn!(error = %e, "game task failed"),
            }
        }

        finished.sort_by_key(|(game_num, _)| *game_num);
        finished.into_iter().map(|(_, record)| record).collect()
    }
}

/// Play a single game from the start position
pub async fn play_game(
    service: &dyn MoveService,
    easy_color: PlayerColor,
    max_plies: u32,
) -> GameRecord {
    let mut board = BoardState::new();
    let mut plies = Vec::new();

    let end = loop {
        if let Some(outcome) = board.outcome() {
            break game_end(outcome, easy_color);
        }
        if plies.len() >= max_plies as usize {
            break GameEnd::PlyCap;
        }

        let mode = if board.side_to_move() == easy_color.to_engine() {
            Mode::Easy
        } else {
            Mode::Hard
        };

        let prediction = match service.predict(mode, &board.fen()).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(%mode, error = %e, "prediction failed, abandoning game");
                break GameEnd::RequestFailed {
                    error: e.to_string(),
                };
            }
        };

        if let Err(e) = board.apply_uci(&prediction.action) {
            warn!(%mode, action = %prediction.action, error = %e, "unusable action, abandoning game");
            break GameEnd::Rejected {
                action: prediction.action,
            };
        }
        debug!(%mode, action = %prediction.action, confidence = ?prediction.confidence, "ply");

        let confidence = match mode {
            Mode::Easy => prediction.confidence,
            Mode::Hard => prediction.confidence.map(|c| -c),
        };
        plies.push(Ply {
            mode,
            action: prediction.action,
            confidence,
        });
    };

    GameRecord {
        easy_color,
        plies,
        end,
    }
}

fn game_end(outcome: Outcome, easy_color: PlayerColor) -> GameEnd {
    match outcome {
        Outcome::Checkmate { winner } => GameEnd::Checkmate {
            winner: if winner == easy_color.to_engine() {
                Mode::Easy
            } else {
                Mode::Hard
            },
        },
        Outcome::Stalemate => draw("stalemate"),
        Outcome::FiftyMoves => draw("fifty moves"),
        Outcome::Repetition => draw("repetition"),
        Outcome::InsufficientMaterial => draw("insufficient material"),
    }
}

fn draw(reason: &str) -> GameEnd {
    GameEnd::Draw {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
