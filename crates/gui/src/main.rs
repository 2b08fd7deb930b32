//! Remote-AI chess board
//!
//! A desktop board played against a remote prediction service:
//! - Click a piece, then a highlighted square, to move
//! - The service answers with its move in the chosen mode
//! - Hint and undo from the side panel
//! - Finished games are submitted to the history endpoint when signed in

mod app;
mod board;
mod styles;

use anyhow::Context;
use app::{ChessApp, Launch};
use clap::Parser;
use client_core::{ClientConfig, HttpMoveService, Mode, PlayerColor, Variant};
use iced::application;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess_gui", about = "Play chess against a remote prediction service")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the prediction service
    #[arg(long)]
    server: Option<String>,

    /// Side the human plays (white or black)
    #[arg(long)]
    color: Option<PlayerColor>,

    /// Difficulty (easy or hard)
    #[arg(long)]
    mode: Option<Mode>,

    /// Board flavour (game or play)
    #[arg(long)]
    variant: Option<Variant>,

    /// Submit finished games to the history endpoint
    #[arg(long)]
    signed_in: bool,

    /// Directory holding the piece images
    #[arg(long)]
    assets: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };

        if let Some(server) = self.server {
            config.server_url = server;
        }
        if let Some(color) = self.color {
            config.player_color = color;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if self.signed_in {
            config.anonymous = false;
        }
        if let Some(assets) = self.assets {
            config.assets_dir = assets;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Args::parse().into_config()?;
    let service = HttpMoveService::with_timeout(&config.server_url, config.request_timeout())
        .context("failed to build the prediction client")?;
    tracing::info!(server = %config.server_url, variant = ?config.variant, "starting board");

    let launch = Launch {
        options: config.session_options(),
        assets_dir: config.assets_dir.clone(),
        service: Arc::new(service),
    };

    application("ML-chess", ChessApp::update, ChessApp::view)
        .subscription(ChessApp::subscription)
        .theme(ChessApp::theme)
        .window_size((1000.0, 680.0))
        .run_with(move || ChessApp::new(launch))
        .map_err(|e| anyhow::anyhow!("gui exited with an error: {e}"))
}
