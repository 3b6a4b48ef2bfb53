//! Game configuration.
//!
//! Every field has a default taken from `constants.rs`, so a partial JSON
//! file (or none at all) yields the stock game.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable parameters for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena width in logical pixels
    pub arena_width: f64,
    /// Arena height in logical pixels, ground included
    pub arena_height: f64,
    /// Height of the ground strip at the bottom of the arena
    pub ground_height: f64,

    /// Fixed horizontal position of the bird's centre
    pub bird_x: f64,
    /// Bird start height as a fraction of the arena height
    pub bird_start_y_fraction: f64,
    /// Downward acceleration per tick
    pub gravity: f64,
    /// Velocity set by a flap (negative = upward)
    pub flap_strength: f64,

    pub pipe_width: f64,
    /// Gap size at the start of every run
    pub base_gap: f64,
    /// Floor for the gap size under the difficulty ramp
    pub min_gap: f64,
    /// Gap reduction applied every `speed_increase_interval` points
    pub gap_step: f64,
    /// Horizontal distance that triggers the next spawn
    pub pipe_spacing: f64,
    /// Scroll speed at the start of every run
    pub base_speed: f64,
    pub speed_increase_factor: f64,
    pub speed_increase_interval: u32,
    /// Maximum vertical distance between consecutive gap centres
    pub max_gap_delta: f64,
    /// Clearance between a gap and the ceiling or ground
    pub edge_margin: f64,

    /// Ticks during which restart intents are ignored after a crash
    pub restart_cooldown: f64,
    /// Cap applied to the per-tick elapsed-time ratio
    pub max_dt: f64,

    /// Drain the gesture channel every N ticks
    pub gesture_poll_interval: u64,
    pub pinch_threshold: f64,
    pub release_threshold: f64,

    /// Base URL of the shared leaderboard service (None = offline)
    pub leaderboard_url: Option<String>,
    /// Newline-delimited JSON landmark stream from a hand tracker
    pub landmarks_path: Option<PathBuf>,
    /// RNG seed for pipe generation (None = random)
    pub seed: Option<u64>,
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ground_height: GROUND_HEIGHT,
            bird_x: BIRD_X,
            bird_start_y_fraction: BIRD_START_Y_FRACTION,
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
            pipe_width: PIPE_WIDTH,
            base_gap: BASE_GAP,
            min_gap: MIN_GAP,
            gap_step: GAP_DECREASE_AMOUNT,
            pipe_spacing: PIPE_SPACING,
            base_speed: BASE_PIPE_SPEED,
            speed_increase_factor: SPEED_INCREASE_FACTOR,
            speed_increase_interval: SPEED_INCREASE_INTERVAL,
            max_gap_delta: PIPE_MAX_GAP_DELTA,
            edge_margin: PIPE_EDGE_MARGIN,
            restart_cooldown: RESTART_COOLDOWN_TICKS,
            max_dt: MAX_FRAME_DT,
            gesture_poll_interval: GESTURE_POLL_INTERVAL,
            pinch_threshold: PINCH_THRESHOLD,
            release_threshold: RELEASE_THRESHOLD,
            leaderboard_url: None,
            landmarks_path: None,
            seed: None,
            muted: false,
        }
    }
}

impl GameConfig {
    /// Y coordinate of the ground surface.
    pub fn ground_y(&self) -> f64 {
        self.arena_height - self.ground_height
    }

    /// Y coordinate the bird is placed at when a run begins.
    pub fn bird_start_y(&self) -> f64 {
        self.arena_height * self.bird_start_y_fraction
    }

    /// Read a config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file, falling back to defaults when it is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject geometry that leaves pipe generation without a valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(ConfigError::Invalid("arena must have a positive size".into()));
        }
        if self.ground_height < 0.0 || self.ground_height >= self.arena_height {
            return Err(ConfigError::Invalid(
                "ground must fit inside the arena".into(),
            ));
        }
        if self.min_gap <= 0.0 || self.base_gap < self.min_gap {
            return Err(ConfigError::Invalid(format!(
                "base gap {} must be at least min gap {} (> 0)",
                self.base_gap, self.min_gap
            )));
        }
        let playable = self.ground_y() - 2.0 * self.edge_margin;
        if playable < self.base_gap {
            return Err(ConfigError::Invalid(format!(
                "gap {} does not fit between margins ({} available)",
                self.base_gap, playable
            )));
        }
        if self.max_dt <= 0.0 || self.pipe_spacing <= 0.0 || self.base_speed <= 0.0 {
            return Err(ConfigError::Invalid(
                "timing, spacing and speed must be positive".into(),
            ));
        }
        if self.release_threshold < self.pinch_threshold {
            return Err(ConfigError::Invalid(
                "release threshold must not be below pinch threshold".into(),
            ));
        }
        if self.speed_increase_interval == 0 || self.gesture_poll_interval == 0 {
            return Err(ConfigError::Invalid("intervals must be non-zero".into()));
        }
        Ok(())
    }
}
