//! Generation configuration
//!
//! Plain data with per-field defaults so a partial JSON file is enough.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Seed value that asks for a clock-derived seed
pub const RANDOM_SEED: i64 = -1;

/// Inclusive size range for room sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Check if `value` is within the range
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Everything that determines a generated dungeon, together with the seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Room side length range (inclusive)
    pub room_size: SizeRange,
    /// Scales the minimum spacing between rooms (0.0 - 1.0)
    pub sparseness: f32,
    /// Upper bound for the doors a room punches itself
    pub max_doors_per_room: u32,
    /// Number of room placement attempts
    pub max_attempts: u32,
    /// Prune corridor dead ends after doors are connected
    pub remove_dead_ends: bool,
    /// Fixed seed; `None` or `-1` derives one from the clock
    pub seed: Option<i64>,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            room_size: SizeRange::new(2, 5),
            sparseness: 0.5,
            max_doors_per_room: 2,
            max_attempts: 100,
            remove_dead_ends: false,
            seed: None,
        }
    }
}

impl DungeonConfig {
    /// Default configuration with the given seed
    ///
    /// [`RANDOM_SEED`] still asks for a clock seed and other negative values
    /// fail validation.
    pub fn with_seed(seed: i64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading dungeon config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let SizeRange { min, max } = self.room_size;
        if min == 0 || max < min {
            return Err(ConfigError::InvalidRoomSize { min, max });
        }

        if !(0.0..=1.0).contains(&self.sparseness) {
            return Err(ConfigError::InvalidSparseness(self.sparseness));
        }

        if self.max_doors_per_room == 0 {
            return Err(ConfigError::InvalidDoorCount(self.max_doors_per_room));
        }

        if let Some(seed) = self.seed
            && seed < 0
            && seed != RANDOM_SEED
        {
            return Err(ConfigError::InvalidSeed(seed));
        }

        Ok(())
    }

    /// Minimum number of free cells kept around every room
    ///
    /// `max(1, round((min + max) / 2 * sparseness))` with integer halving
    /// and round-half-to-even.
    pub fn min_room_spacing(&self) -> u32 {
        let half = (self.room_size.min + self.room_size.max) / 2;
        let scaled = (half as f32 * self.sparseness).round_ties_even();
        (scaled as u32).max(1)
    }

    /// The seed a run will use
    pub fn resolve_seed(&self) -> Result<u64, ConfigError> {
        match self.seed {
            None | Some(RANDOM_SEED) => Ok(clock_seed()),
            Some(seed) if seed >= 0 => Ok(seed as u64),
            Some(seed) => Err(ConfigError::InvalidSeed(seed)),
        }
    }
}

/// Seed derived from wall-clock milliseconds, kept below 100 000
fn clock_seed() -> u64 {
    let millis = chrono::Utc::now().timestamp_millis();
    millis.rem_euclid(100_000) as u64
}
