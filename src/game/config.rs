use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid; odd and greater than 3
    pub grid_size: usize,
    /// Simulation speed; at least 1
    pub ticks_per_second: f64,
    /// Shortest drag that counts as a swipe rather than a tap, in terminal columns
    pub swipe_distance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 35,
            ticks_per_second: 8.0,
            swipe_distance: 4.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size and speed
    pub fn new(grid_size: usize, ticks_per_second: f64) -> Self {
        Self {
            grid_size,
            ticks_per_second,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(11, 8.0)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), GameError> {
        validate_grid_size(self.grid_size)?;

        if !self.ticks_per_second.is_finite() || self.ticks_per_second < 1.0 {
            return Err(GameError::InvalidConfig(format!(
                "ticks_per_second must be a finite number >= 1, got {}",
                self.ticks_per_second
            )));
        }

        if self.tick_interval().is_zero() {
            return Err(GameError::InvalidConfig(format!(
                "ticks_per_second {} is too fast for the timer",
                self.ticks_per_second
            )));
        }

        if !self.swipe_distance.is_finite() || self.swipe_distance <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "swipe_distance must be positive, got {}",
                self.swipe_distance
            )));
        }

        Ok(())
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second)
    }
}

/// Grid sizes must be odd so a fresh body can spawn symmetrically around one center cell
pub fn validate_grid_size(grid_size: usize) -> Result<(), GameError> {
    if grid_size <= 3 {
        return Err(GameError::InvalidConfig(format!(
            "grid_size must be greater than 3, got {grid_size}"
        )));
    }

    if grid_size % 2 != 1 {
        return Err(GameError::InvalidConfig(format!(
            "grid_size must be odd, got {grid_size}"
        )));
    }

    if i32::try_from(grid_size).is_err() {
        return Err(GameError::InvalidConfig(format!(
            "grid_size {grid_size} does not fit grid coordinates"
        )));
    }

    Ok(())
}
