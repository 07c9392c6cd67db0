//! # Simulation Configuration
//!
//! Everything needed to start a run besides the game catalog: world seed,
//! RNG seed, spawn layout and loop tuning. Loaded once from TOML.
//!
//! `SimulationConfig::default()` is the classic layout: player in the spawn
//! clearing, boss at (5, 5), five monsters on the diagonal and five chests
//! scattered around the boss.

use std::path::Path;

use delve_procedural::WorldConfig;
use delve_shared::constants::{MAX_DELTA_TIME, TICK_RATE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::DEFAULT_SEED;

/// Errors that can occur while loading a simulation config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML or doesn't match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field is out of its valid range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Run settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maze seed and streaming radius.
    pub world: WorldConfig,
    /// Seed for every random decision the simulation makes.
    pub rng_seed: u64,
    /// Monsters placed at start, on the `(i*2+5, i*2+5)` diagonal.
    pub monster_count: usize,
    /// Chests scattered around `boss_spawn`.
    pub chest_count: usize,
    /// Boss position (x, z).
    pub boss_spawn: [f32; 2],
    /// Player position (x, z).
    pub player_spawn: [f32; 2],
    /// Bounded event channel capacity.
    pub event_capacity: usize,
    /// Largest delta time a single tick simulates, in seconds.
    pub max_delta_time: f32,
    /// Fixed tick rate used by drivers that don't measure real time.
    pub tick_rate: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            rng_seed: DEFAULT_SEED,
            monster_count: 5,
            chest_count: 5,
            boss_spawn: [5.0, 5.0],
            player_spawn: [0.5, 0.5],
            event_capacity: 1024,
            max_delta_time: MAX_DELTA_TIME,
            tick_rate: TICK_RATE,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a config from TOML text. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` for out-of-range settings.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file can't be read, otherwise as
    /// [`SimulationConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks ranges the simulation relies on.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for a zero render distance, zero tick rate, zero event
    /// capacity, a non-positive delta clamp or non-finite spawn points.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.world.render_distance == 0 {
            return Err(invalid("world.render_distance", "must be at least 1"));
        }
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be positive"));
        }
        if self.event_capacity == 0 {
            return Err(invalid("event_capacity", "must be positive"));
        }
        if !self.max_delta_time.is_finite() || self.max_delta_time <= 0.0 {
            return Err(invalid("max_delta_time", "must be a positive number"));
        }
        if !self.boss_spawn.iter().chain(&self.player_spawn).all(|v| v.is_finite()) {
            return Err(invalid("spawn", "coordinates must be finite"));
        }
        Ok(())
    }

    /// Seconds per tick at the configured tick rate.
    #[must_use]
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

const fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
