//! Strictly Towers - Unified CLI
//!
//! Tower of Hanoi played in the terminal with the mouse or the keyboard.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_towers::GameConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            level,
            skip_intro,
        } => run_game(&config, level, skip_intro).await,
        Command::Config { config } => print_config(&config),
    }
}

/// Run the terminal game
async fn run_game(config_path: &Path, level: Option<u8>, skip_intro: bool) -> Result<()> {
    let config = GameConfig::load(config_path)?.with_overrides(level, skip_intro)?;
    strictly_towers::run_tui(config).await
}

/// Print the effective configuration
#[instrument(skip(config_path), fields(config_path = %config_path.display()))]
fn print_config(config_path: &Path) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load(config_path)?;
    info!("Printing effective configuration");
    println!("{}", config.to_toml()?);
    Ok(())
}
