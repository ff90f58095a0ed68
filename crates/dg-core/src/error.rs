//! Configuration errors
//!
//! Everything that can go wrong is caught before generation starts.
//! Degenerate outcomes (no rooms, no exit) are not errors.

use thiserror::Error;

/// Errors reported when building or loading a [`DungeonConfig`](crate::DungeonConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid room size range {min}..={max}")]
    InvalidRoomSize { min: u32, max: u32 },

    #[error("sparseness must be within 0.0..=1.0, got {0}")]
    InvalidSparseness(f32),

    #[error("max doors per room must be at least 1, got {0}")]
    InvalidDoorCount(u32),

    #[error("seed must be non-negative or -1, got {0}")]
    InvalidSeed(i64),

    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_values() {
        let err = ConfigError::InvalidDimensions { width: 0, height: 4 };
        assert!(err.to_string().contains("0x4"));

        let err = ConfigError::InvalidRoomSize { min: 5, max: 2 };
        assert!(err.to_string().contains("5..=2"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
