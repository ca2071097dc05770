//! Command-line interface for strictly_towers.

use clap::{Parser, Subcommand};

/// Strictly Towers - Tower of Hanoi in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_towers")]
#[command(about = "Tower of Hanoi with drag-and-drop disks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the game in the terminal
    Play {
        /// Path to the game configuration file
        #[arg(short, long, default_value = "strictly_towers.toml")]
        config: std::path::PathBuf,

        /// Level to start at (1-4), overriding the config file
        #[arg(short, long)]
        level: Option<u8>,

        /// Skip the intro animation
        #[arg(long)]
        skip_intro: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to the game configuration file
        #[arg(short, long, default_value = "strictly_towers.toml")]
        config: std::path::PathBuf,
    },
}
