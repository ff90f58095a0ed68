//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use dg_core::{DungeonConfig, SizeRange};

/// Generate a seeded room-and-corridor dungeon
///
/// Values given on the command line override the config file.
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen")]
#[command(version, about = "Generate a seeded room-and-corridor dungeon", long_about = None)]
pub struct Args {
    /// JSON config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    pub width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    pub height: Option<u32>,

    /// Seed (-1 picks one from the clock)
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Smallest room side
    #[arg(long)]
    pub room_min: Option<u32>,

    /// Largest room side
    #[arg(long)]
    pub room_max: Option<u32>,

    /// Room spacing factor (0.0 - 1.0)
    #[arg(long)]
    pub sparseness: Option<f32>,

    /// Most doors a room punches itself
    #[arg(long)]
    pub max_doors: Option<u32>,

    /// Room placement attempts
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Prune corridor dead ends
    #[arg(long)]
    pub remove_dead_ends: bool,

    /// Log every generation step at debug level
    #[arg(long)]
    pub steps: bool,

    /// Write the dungeon here instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Apply command-line overrides to a loaded config
    pub fn apply_overrides(&self, config: &mut DungeonConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.room_min.is_some() || self.room_max.is_some() {
            config.room_size = SizeRange::new(
                self.room_min.unwrap_or(config.room_size.min),
                self.room_max.unwrap_or(config.room_size.max),
            );
        }
        if let Some(sparseness) = self.sparseness {
            config.sparseness = sparseness;
        }
        if let Some(doors) = self.max_doors {
            config.max_doors_per_room = doors;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if self.remove_dead_ends {
            config.remove_dead_ends = true;
        }
    }
}
