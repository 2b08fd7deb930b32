//! Client configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file) is a valid configuration.
//!
//! ```toml
//! server_url = "http://127.0.0.1:5000"
//! player_color = "black"
//! anonymous = false
//! mode = "hard"
//! variant = "game"
//! assets_dir = "assets/pieces"
//! request_timeout_secs = 60
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::service::REQUEST_TIMEOUT;
use crate::session::SessionOptions;
use crate::types::{Mode, PlayerColor, Variant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the web server exposing `/predict` and `/add-history`
    pub server_url: String,
    pub player_color: PlayerColor,
    /// Anonymous players never submit their games
    pub anonymous: bool,
    pub mode: Mode,
    pub variant: Variant,
    /// Directory holding `WhitePawn.png` ... `Empty.png`
    pub assets_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            player_color: PlayerColor::White,
            anonymous: true,
            mode: Mode::Easy,
            variant: Variant::Game,
            assets_dir: PathBuf::from("assets/pieces"),
            request_timeout_secs: REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.server_url)
            .map_err(|_| ConfigError::InvalidUrl(self.server_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            mode: self.mode,
            player_color: self.player_color,
            anonymous: self.anonymous,
            variant: self.variant,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
