//! dg-core: seeded room-and-corridor dungeon generation
//!
//! Builds a walled 2D grid of rectangular rooms joined by maze corridors,
//! with doors, an optional dead-end pass, a start cell and an exit cell.
//! A given seed and configuration always produce the same dungeon.
//!
//! ```no_run
//! use dg_core::{DungeonConfig, generate};
//!
//! let dungeon = generate(&DungeonConfig::with_seed(42)).unwrap();
//! println!("{} rooms, exit at {:?}", dungeon.rooms().len(), dungeon.exit());
//! ```
//!
//! This crate has no I/O apart from config loading; logging goes through
//! the `log` facade.

pub mod config;
pub mod corridor;
pub mod door;
pub mod dungeon;
pub mod error;
pub mod exit;
pub mod generator;
pub mod grid;
pub mod prune;
pub mod rng;
pub mod room;

pub use config::{DungeonConfig, RANDOM_SEED, SizeRange};
pub use corridor::{CarveStep, CorridorCarver};
pub use door::Door;
pub use dungeon::Dungeon;
pub use error::ConfigError;
pub use generator::{DungeonGenerator, GenerationEvent};
pub use grid::{Cell, CellId, CellType, Direction, Directions, Edge, Grid};
pub use prune::{DeadEndPruner, MAX_PRUNE_STEPS, PruneStep};
pub use rng::DungeonRng;
pub use room::{Room, RoomId};

/// Generate a complete dungeon in one call
pub fn generate(config: &DungeonConfig) -> Result<Dungeon, ConfigError> {
    Ok(DungeonGenerator::new(config)?.finish())
}
