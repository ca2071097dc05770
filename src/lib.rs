//! Strictly Towers library - Tower of Hanoi in the terminal
//!
//! The rules live in [`strictly_hanoi`]; this crate adds configuration and
//! the terminal front end.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with defaults for every field
//! - **TUI**: ratatui rendering, crossterm input, the intro animation
//!
//! # Example
//!
//! ```
//! use strictly_towers::{App, Command, GameConfig};
//! use strictly_hanoi::PillarId;
//!
//! let config = GameConfig::default().with_overrides(Some(1), true)?;
//! let mut app = App::new(config.flow_settings()?, config.transition());
//! app.handle(Command::Pillar(PillarId::Left));
//! app.handle(Command::Pillar(PillarId::Right));
//! assert!(app.banner().is_some());
//! # Ok::<(), strictly_towers::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Terminal UI
pub use tui::{
    App, Banner, Command, IntroAnimation, IntroElement, IntroFrame, IntroKind, Viewport,
    accel_decel, key_command, mouse_command, run_tui,
};
