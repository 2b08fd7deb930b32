//! Mode match results storage and reporting

use client_core::PlayerColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::match_runner::{GameEnd, GameRecord, MatchConfig, Ply};
use crate::score::MatchResult;

#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid results file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Complete results of one run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModeMatchResults {
    /// Base URL of the service that played
    pub server: String,
    pub config: MatchConfig,
    /// Tally from easy's perspective
    pub summary: MatchResult,
    /// Every game in play order
    pub games: Vec<GameRecord>,
}

impl ModeMatchResults {
    pub fn new(server: &str, config: MatchConfig, games: Vec<GameRecord>) -> Self {
        let mut summary = MatchResult::new();
        for game in &games {
            summary.record(game.result());
        }
        Self {
            server: server.to_string(),
            config,
            summary,
            games,
        }
    }

    /// Ply lists of the games where easy played `color`
    pub fn plies_with_easy_as(&self, color: PlayerColor) -> Vec<&[Ply]> {
        self.games
            .iter()
            .filter(|game| game.easy_color == color)
            .map(|game| game.plies.as_slice())
            .collect()
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ResultsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResultsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ResultsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Mode match: easy vs hard ===\n\n");
        report.push_str(&format!("Server: {}\n", self.server));
        report.push_str(&format!(
            "Config: {} games, {} plies max, {} concurrent\n\n",
            self.config.num_games, self.config.max_plies, self.config.concurrency
        ));

        report.push_str(&format!(
            "{:<6} {:<8} {:>6} {:>10}  {}\n",
            "Game", "Easy", "Plies", "Mean conf", "End"
        ));
        report.push_str(&"-".repeat(60));
        report.push('\n');

        for (i, game) in self.games.iter().enumerate() {
            let mean = mean_confidence(&game.plies)
                .map(|c| format!("{c:.3}"))
                .unwrap_or_else(|| "-".to_string());
            report.push_str(&format!(
                "{:<6} {:<8} {:>6} {:>10}  {}\n",
                i + 1,
                game.easy_color.as_str(),
                game.plies.len(),
                mean,
                describe_end(&game.end)
            ));
        }

        let summary = &self.summary;
        report.push('\n');
        report.push_str(&format!(
            "Easy: {} wins, {} losses, {} draws, {} aborted\n",
            summary.wins, summary.losses, summary.draws, summary.aborted
        ));
        report.push_str(&format!("Score: {:.1}%\n", summary.score() * 100.0));
        match summary.elo_difference() {
            Some(diff) => report.push_str(&format!("Elo difference (easy - hard): {diff:+.0}\n")),
            None => report.push_str("Elo difference (easy - hard): unbounded\n"),
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

fn mean_confidence(plies: &[Ply]) -> Option<f64> {
    let values: Vec<f64> = plies.iter().filter_map(|p| p.confidence).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn describe_end(end: &GameEnd) -> String {
    match end {
        GameEnd::Checkmate { winner } => format!("{winner} mates"),
        GameEnd::Draw { reason } => format!("draw ({reason})"),
        GameEnd::Rejected { action } => format!("rejected {action}"),
        GameEnd::RequestFailed { error } => format!("request failed: {error}"),
        GameEnd::PlyCap => "ply cap".to_string(),
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
