//! Match scoring from the easy mode's point of view

use serde::{Deserialize, Serialize};

/// Result of a single finished game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Tally over a whole match
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Games cut short by a rejected action or a failed request
    pub aborted: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: Option<GameResult>) {
        match result {
            Some(GameResult::Win) => self.wins += 1,
            Some(GameResult::Loss) => self.losses += 1,
            Some(GameResult::Draw) => self.draws += 1,
            None => self.aborted += 1,
        }
    }

    /// Finished games only
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from easy's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    /// Rating difference of easy over hard implied by the score.
    ///
    /// `None` when the score is 0 or 1, where the logistic model diverges.
    pub fn elo_difference(&self) -> Option<f64> {
        let score = self.score();
        if score <= 0.0 || score >= 1.0 {
            return None;
        }
        Some(-400.0 * (1.0 / score - 1.0).log10())
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod score_tests;
