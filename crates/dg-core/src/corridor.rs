//! Corridor carving with a randomized backtracker
//!
//! Every empty cell left after room placement becomes a corridor. Rooms are
//! treated as already visited, so the walk flows around them. When the walk
//! runs out of cells to backtrack to while empty cells remain (rooms split
//! the free space into pockets), it jumps to the next empty cell in id order
//! and starts a new region there. That region is not linked to the earlier
//! ones; only room doors can join them later.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::grid::{CellId, CellType, Direction, Edge, Grid};
use crate::rng::DungeonRng;

/// One unit of carving progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarveStep {
    /// Opened the wall from `from` toward `dir` and moved into `to`
    Carved {
        from: CellId,
        to: CellId,
        dir: Direction,
    },
    /// Dead end; walked back to an earlier branch point
    Backtracked { to: CellId },
    /// Stack exhausted; started a new region at `to`
    Jumped { to: CellId },
}

/// Resumable backtracker state
///
/// The visited mask, the stack and the current cell are the whole state, so
/// carving can be paused between any two steps.
#[derive(Debug, Clone)]
pub struct CorridorCarver {
    visited: Vec<bool>,
    stack: Vec<CellId>,
    current: Option<CellId>,
    remaining: usize,
    start: Option<CellId>,
    regions: usize,
}

impl CorridorCarver {
    /// Claim the first empty cell as the start and prepare the walk
    pub fn new(grid: &mut Grid) -> Self {
        let visited: Vec<bool> = grid
            .cells()
            .map(|c| c.cell_type() != CellType::Empty)
            .collect();
        let remaining = visited.iter().filter(|v| !**v).count();

        let mut carver = Self {
            visited,
            stack: Vec::with_capacity(remaining),
            current: None,
            remaining,
            start: None,
            regions: 0,
        };

        if let Some(start) = grid.first_of(CellType::Empty) {
            carver.claim(grid, start);
            carver.start = Some(start);
            carver.regions = 1;
            trace!("corridor start at cell {start}");
        }
        carver
    }

    /// First corridor cell, `None` when the grid had no free cells
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// Number of separately seeded corridor regions so far
    pub fn regions(&self) -> usize {
        self.regions
    }

    /// Perform one step, `None` once every empty cell is carved
    pub fn step(&mut self, grid: &mut Grid, rng: &mut DungeonRng) -> Option<CarveStep> {
        if self.is_done() {
            return None;
        }
        let current = self.current?;

        let neighbors: Vec<(Direction, CellId)> = Direction::iter()
            .filter_map(|dir| {
                grid.neighbor(current, dir)
                    .filter(|&n| !self.visited[n])
                    .map(|n| (dir, n))
            })
            .collect();

        if let Some(&(dir, next)) = rng.choose(&neighbors) {
            grid.set_boundary(current, dir, Edge::Open);
            self.claim(grid, next);
            return Some(CarveStep::Carved {
                from: current,
                to: next,
                dir,
            });
        }

        self.stack.pop();
        if let Some(&previous) = self.stack.last() {
            self.current = Some(previous);
            return Some(CarveStep::Backtracked { to: previous });
        }

        let next = grid.first_of(CellType::Empty)?;
        self.claim(grid, next);
        self.regions += 1;
        trace!("corridor region {} seeded at cell {next}", self.regions);
        Some(CarveStep::Jumped { to: next })
    }

    /// Turn a cell into corridor, mark it visited and make it current
    fn claim(&mut self, grid: &mut Grid, id: CellId) {
        grid.set_type(id, CellType::Corridor);
        self.visited[id] = true;
        self.remaining -= 1;
        self.stack.push(id);
        self.current = Some(id);
    }
}

/// Carve every empty cell in one go and return the start cell
pub fn carve_corridors(grid: &mut Grid, rng: &mut DungeonRng) -> Option<CellId> {
    let mut carver = CorridorCarver::new(grid);
    let mut steps = 0usize;
    while carver.step(grid, rng).is_some() {
        steps += 1;
    }
    debug!(
        "carved corridors in {steps} steps, {} region(s)",
        carver.regions()
    );
    carver.start()
}
