//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_hanoi::{FlowSettings, Layout, Level};
use tracing::{debug, info, instrument};

/// Settings for a game session.
///
/// Every field has a default, so a partial file (or none at all) works.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds the intro plays before the game starts on its own.
    #[serde(default = "default_intro_delay_secs")]
    intro_delay_secs: f32,

    /// Level to start at (1-4).
    #[serde(default = "default_start_level")]
    start_level: u8,

    /// Start playing without the intro.
    #[serde(default)]
    skip_intro: bool,

    /// Milliseconds between frames.
    #[serde(default = "default_tick_millis")]
    tick_millis: u64,

    /// How long a transition banner stays up, in milliseconds.
    #[serde(default = "default_transition_millis")]
    transition_millis: u64,

    /// File the terminal UI writes its log to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// World geometry.
    #[serde(default)]
    layout: Layout,
}

fn default_intro_delay_secs() -> f32 {
    4.0
}

fn default_start_level() -> u8 {
    1
}

fn default_tick_millis() -> u64 {
    16
}

fn default_transition_millis() -> u64 {
    1000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_towers.log")
}

/// True for finite and infinite values above zero; false for NaN.
fn positive(value: f32) -> bool {
    value > 0.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            intro_delay_secs: default_intro_delay_secs(),
            start_level: default_start_level(),
            skip_intro: false,
            tick_millis: default_tick_millis(),
            transition_millis: default_transition_millis(),
            log_file: default_log_file(),
            layout: Layout::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(start_level = config.start_level, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        level: Option<u8>,
        skip_intro: bool,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = level {
            debug!(level, "Overriding start level");
            self.start_level = level;
        }
        if skip_intro {
            self.skip_intro = true;
        }
        self.validate()?;
        Ok(self)
    }

    /// Rejects values the game cannot run with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        Level::new(self.start_level).map_err(|e| ConfigError::new(e.to_string()))?;

        self.intro_delay()?;
        if self.tick_millis == 0 {
            return Err(ConfigError::new("tick_millis must be at least 1".to_string()));
        }

        let layout = &self.layout;
        if !positive(layout.world_width) || !positive(layout.world_height) {
            return Err(ConfigError::new("layout world size must be positive".to_string()));
        }
        if !positive(layout.disk_height) || !positive(layout.disk_base_width) {
            return Err(ConfigError::new("layout disk size must be positive".to_string()));
        }
        if !positive(layout.pillar_half_width) || !positive(layout.pillar_half_height) {
            return Err(ConfigError::new("layout pillar extents must be positive".to_string()));
        }
        if layout.disk_gap.is_nan() || layout.disk_gap < 0.0 {
            return Err(ConfigError::new(format!(
                "layout disk_gap must not be negative, got {}",
                layout.disk_gap
            )));
        }
        Ok(())
    }

    /// Intro length, rejecting values a `Duration` cannot hold.
    fn intro_delay(&self) -> Result<Duration, ConfigError> {
        if !positive(self.intro_delay_secs) {
            return Err(ConfigError::new(format!(
                "intro_delay_secs must be positive, got {}",
                self.intro_delay_secs
            )));
        }
        Duration::try_from_secs_f32(self.intro_delay_secs).map_err(|e| {
            ConfigError::new(format!(
                "intro_delay_secs {} is not a valid duration: {}",
                self.intro_delay_secs, e
            ))
        })
    }

    /// Settings for the scene flow.
    pub fn flow_settings(&self) -> Result<FlowSettings, ConfigError> {
        Ok(FlowSettings {
            intro_delay: self.intro_delay()?,
            start_level: Level::new(self.start_level)
                .map_err(|e| ConfigError::new(e.to_string()))?,
            skip_intro: self.skip_intro,
            layout: self.layout.clone(),
        })
    }

    /// Frame interval.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Transition banner duration.
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_millis)
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
