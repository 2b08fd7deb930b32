//! End-of-game handling: history serialization and submission

use std::time::Duration;
use tracing::{info, warn};

use crate::board::BoardState;
use crate::service::MoveService;
use crate::types::{Mode, PlayerColor};

/// Notice shown when a game ends
pub const GAME_OVER_NOTICE: &str = "game over!";

/// Pause between a game-ending reply and the finish handling
pub const REPLY_FINISH_DELAY: Duration = Duration::from_secs(1);

/// A finished game as submitted to the history endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub mode: Mode,
    /// The human's side
    pub player_color: PlayerColor,
    /// `from+to` pairs joined by commas, e.g. `e2e4,e7e5`
    pub history: String,
}

impl HistoryRecord {
    pub fn from_board(board: &BoardState, mode: Mode, player_color: PlayerColor) -> Self {
        Self {
            mode,
            player_color,
            history: board.history_string(),
        }
    }

    pub fn plies(&self) -> usize {
        if self.history.is_empty() {
            0
        } else {
            self.history.split(',').count()
        }
    }
}

/// Submit a finished game. Failures are logged and otherwise ignored.
pub async fn submit_history(service: &dyn MoveService, record: &HistoryRecord) {
    match service.add_history(record).await {
        Ok(()) => info!(plies = record.plies(), "game history recorded"),
        Err(e) => warn!(error = %e, "failed to record game history"),
    }
}
