//! Generation pipeline
//!
//! [`DungeonGenerator`] runs the phases in a fixed order: rooms, corridors,
//! doors, optional dead-end pruning, exit. It is an iterator of
//! [`GenerationEvent`]s; each `next()` does one unit of work, and the
//! partially built grid can be inspected in between. How often the caller
//! resumes never changes the result.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::corridor::{CarveStep, CorridorCarver};
use crate::door::{Door, connect_rooms};
use crate::dungeon::Dungeon;
use crate::error::ConfigError;
use crate::exit::select_exit;
use crate::grid::{CellId, Grid};
use crate::prune::{DeadEndPruner, PruneStep};
use crate::room::{Room, place_rooms};
use crate::rng::DungeonRng;

/// Progress reported by [`DungeonGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEvent {
    /// Room placement finished
    RoomsPlaced { count: usize },
    /// One corridor carving step
    Carve(CarveStep),
    /// Every room had its door pass
    DoorsConnected { count: usize },
    /// One dead-end cell erased
    Prune(PruneStep),
    /// Generation finished with this exit
    ExitSelected { exit: Option<CellId> },
}

/// Where the generator is in the pipeline
#[derive(Debug, Clone)]
enum Phase {
    Rooms,
    Carving(CorridorCarver),
    Doors,
    Pruning(DeadEndPruner),
    Exit,
    Done,
}

/// Step-by-step dungeon generation
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: DungeonConfig,
    seed: u64,
    rng: DungeonRng,
    grid: Grid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    start: Option<CellId>,
    exit: Option<CellId>,
    phase: Phase,
}

impl DungeonGenerator {
    /// Validate the configuration, resolve the seed and allocate the grid
    pub fn new(config: &DungeonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.resolve_seed()?;
        debug!(
            "generating {}x{} dungeon with seed {seed}",
            config.width, config.height
        );

        Ok(Self {
            config: config.clone(),
            seed,
            rng: DungeonRng::new(seed),
            grid: Grid::new(config.width, config.height),
            rooms: Vec::new(),
            doors: Vec::new(),
            start: None,
            exit: None,
            phase: Phase::Rooms,
        })
    }

    /// The resolved seed of this run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// The grid as built so far
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Start cell, known once room placement is done
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Run the remaining steps and hand over the finished dungeon
    pub fn finish(mut self) -> Dungeon {
        while self.next().is_some() {}
        Dungeon::new(
            self.seed,
            self.config,
            self.grid,
            self.rooms,
            self.doors,
            self.start,
            self.exit,
        )
    }
}

impl Iterator for DungeonGenerator {
    type Item = GenerationEvent;

    fn next(&mut self) -> Option<GenerationEvent> {
        loop {
            match &mut self.phase {
                Phase::Rooms => {
                    self.rooms = place_rooms(&mut self.grid, &self.config, &mut self.rng);
                    let carver = CorridorCarver::new(&mut self.grid);
                    self.start = carver.start();
                    self.phase = Phase::Carving(carver);
                    return Some(GenerationEvent::RoomsPlaced {
                        count: self.rooms.len(),
                    });
                }
                Phase::Carving(carver) => {
                    if let Some(step) = carver.step(&mut self.grid, &mut self.rng) {
                        return Some(GenerationEvent::Carve(step));
                    }
                    debug!("corridors done, {} region(s)", carver.regions());
                    self.phase = Phase::Doors;
                }
                Phase::Doors => {
                    self.doors = connect_rooms(
                        &mut self.grid,
                        &mut self.rooms,
                        self.config.max_doors_per_room,
                        &mut self.rng,
                    );
                    self.phase = if self.config.remove_dead_ends {
                        Phase::Pruning(DeadEndPruner::new(&self.grid, self.start))
                    } else {
                        Phase::Exit
                    };
                    return Some(GenerationEvent::DoorsConnected {
                        count: self.doors.len(),
                    });
                }
                Phase::Pruning(pruner) => {
                    if let Some(step) = pruner.step(&mut self.grid) {
                        return Some(GenerationEvent::Prune(step));
                    }
                    debug!(
                        "pruned {} cell(s), {} chain(s) capped",
                        pruner.pruned(),
                        pruner.capped()
                    );
                    self.phase = Phase::Exit;
                }
                Phase::Exit => {
                    self.exit = select_exit(
                        &self.grid,
                        &self.rooms,
                        self.start,
                        self.config.remove_dead_ends,
                        &mut self.rng,
                    );
                    self.phase = Phase::Done;
                    info!(
                        "dungeon {}x{} seed {}: {} room(s), {} door(s), start {:?}, exit {:?}",
                        self.grid.width(),
                        self.grid.height(),
                        self.seed,
                        self.rooms.len(),
                        self.doors.len(),
                        self.start,
                        self.exit
                    );
                    return Some(GenerationEvent::ExitSelected { exit: self.exit });
                }
                Phase::Done => return None,
            }
        }
    }
}
