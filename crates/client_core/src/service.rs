//! Client for the remote move-prediction service
//!
//! Two endpoints, both form-encoded POSTs:
//! - `/predict` with `mode` and `fen`, answering `{"action": ..., "confidence": ...}`
//! - `/add-history` with `mode`, `player-color` and `history`, answer ignored

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::ServiceError;
use crate::finish::HistoryRecord;
use crate::types::Mode;

/// Default bound on a single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Answer of the prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Suggested move in long algebraic notation
    pub action: String,
    /// Service's confidence in the move, when it reports one
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Remote side of a session: predicts moves and records finished games
#[async_trait]
pub trait MoveService: Send + Sync {
    async fn predict(&self, mode: Mode, fen: &str) -> Result<Prediction, ServiceError>;

    async fn add_history(&self, record: &HistoryRecord) -> Result<(), ServiceError>;
}

/// `MoveService` over HTTP
#[derive(Debug, Clone)]
pub struct HttpMoveService {
    client: reqwest::Client,
    predict_url: reqwest::Url,
    history_url: reqwest::Url,
}

impl HttpMoveService {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        // A trailing slash keeps any path prefix when joining endpoints
        let base = reqwest::Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|_| ServiceError::InvalidUrl(base_url.to_string()))?;
        let predict_url = base
            .join("predict")
            .map_err(|_| ServiceError::InvalidUrl(base_url.to_string()))?;
        let history_url = base
            .join("add-history")
            .map_err(|_| ServiceError::InvalidUrl(base_url.to_string()))?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            predict_url,
            history_url,
        })
    }
}

#[async_trait]
impl MoveService for HttpMoveService {
    async fn predict(&self, mode: Mode, fen: &str) -> Result<Prediction, ServiceError> {
        debug!(%mode, fen, "requesting prediction");
        let response = self
            .client
            .post(self.predict_url.clone())
            .form(&[("mode", mode.as_str()), ("fen", fen)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let prediction: Prediction =
            serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;
        debug!(action = %prediction.action, confidence = ?prediction.confidence, "prediction received");
        Ok(prediction)
    }

    async fn add_history(&self, record: &HistoryRecord) -> Result<(), ServiceError> {
        debug!(mode = %record.mode, color = %record.player_color, plies = record.plies(), "submitting history");
        self.client
            .post(self.history_url.clone())
            .form(&[
                ("mode", record.mode.as_str()),
                ("player-color", record.player_color.as_str()),
                ("history", record.history.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
