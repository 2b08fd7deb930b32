//! Mode match CLI
//!
//! Play the service's easy and hard modes against each other.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use client_core::{ClientConfig, HttpMoveService};
use mode_match::{MatchConfig, MatchRunner, ModeMatchResults};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mode_match", about = "Easy-vs-hard self-play through the prediction service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match and save the results
    Run(RunArgs),
    /// Print the report of saved results
    Report {
        /// Results file written by `run`
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// TOML configuration file (server_url and request_timeout_secs are used)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the prediction service
    #[arg(long)]
    server: Option<String>,

    #[arg(long, short = 'g', default_value_t = 10)]
    games: u32,

    /// Plies per game before it is scored as a draw
    #[arg(long, default_value_t = 300)]
    max_plies: u32,

    /// Games in flight at once
    #[arg(long, default_value_t = 10)]
    concurrency: usize,

    /// Let easy play white in every game
    #[arg(long)]
    fixed_colors: bool,

    #[arg(long, short = 'o', default_value = "mode_match.json")]
    output: PathBuf,
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(server) = args.server {
        config.server_url = server;
    }
    config.validate()?;

    let service = HttpMoveService::with_timeout(&config.server_url, config.request_timeout())
        .context("failed to build the prediction client")?;

    let match_config = MatchConfig {
        num_games: args.games,
        max_plies: args.max_plies,
        concurrency: args.concurrency,
        alternate_colors: !args.fixed_colors,
    };
    tracing::info!(server = %config.server_url, games = args.games, "starting mode match");

    let runner = MatchRunner::new(match_config.clone());
    let games = runner.run_match(Arc::new(service)).await;

    let results = ModeMatchResults::new(&config.server_url, match_config, games);
    results
        .save(&args.output)
        .with_context(|| format!("failed to save results to {}", args.output.display()))?;
    tracing::info!(path = %args.output.display(), "results saved");

    results.print_report();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Run(args) => run(args).await,
        Command::Report { path } => {
            let results = ModeMatchResults::load(&path)?;
            results.print_report();
            Ok(())
        }
    }
}
