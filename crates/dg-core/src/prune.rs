//! Dead-end removal
//!
//! A dead end is a corridor cell with three walls and one open passage. The
//! pruner follows each dead end back along its corridor, erasing cells until
//! it reaches a junction, a room entrance or the start cell.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::grid::{CellId, CellType, Direction, Edge, Grid};

/// Most cells a single chain may erase
pub const MAX_PRUNE_STEPS: usize = 100;

/// One erased corridor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneStep {
    /// Cell turned back into empty space
    pub cell: CellId,
    /// The neighbor the chain continues into
    pub next: CellId,
    /// Direction from `cell` to `next`, now walled off
    pub dir: Direction,
}

/// Open direction of a prunable dead end
///
/// A corridor whose only opening is a door is a room entrance and is kept.
fn dead_end_exit(grid: &Grid, id: CellId, start: Option<CellId>) -> Option<Direction> {
    let cell = grid.cell(id);
    if cell.cell_type() != CellType::Corridor || Some(id) == start || cell.wall_count() != 3 {
        return None;
    }
    cell.open_edges().single()
}

/// Resumable dead-end pruner
///
/// Dead ends are collected once, in row-major order, when the pruner is
/// created; each chain is then followed one cell per step.
#[derive(Debug, Clone)]
pub struct DeadEndPruner {
    dead_ends: Vec<CellId>,
    next_chain: usize,
    current: Option<CellId>,
    chain_len: usize,
    start: Option<CellId>,
    pruned: usize,
    capped: usize,
}

impl DeadEndPruner {
    pub fn new(grid: &Grid, start: Option<CellId>) -> Self {
        let dead_ends: Vec<CellId> = grid
            .cells()
            .map(|c| c.id())
            .filter(|&id| dead_end_exit(grid, id, start).is_some())
            .collect();
        trace!("found {} dead end(s)", dead_ends.len());

        Self {
            dead_ends,
            next_chain: 0,
            current: None,
            chain_len: 0,
            start,
            pruned: 0,
            capped: 0,
        }
    }

    /// Dead ends found when the pass started
    pub fn dead_ends(&self) -> &[CellId] {
        &self.dead_ends
    }

    /// Cells erased so far
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    /// Chains stopped by [`MAX_PRUNE_STEPS`]
    pub fn capped(&self) -> usize {
        self.capped
    }

    /// Erase one cell, `None` once every chain is finished
    pub fn step(&mut self, grid: &mut Grid) -> Option<PruneStep> {
        loop {
            if let Some(id) = self.current {
                if let Some(dir) = dead_end_exit(grid, id, self.start) {
                    if self.chain_len >= MAX_PRUNE_STEPS {
                        warn!("dead-end chain stopped at cell {id} after {MAX_PRUNE_STEPS} cells");
                        self.capped += 1;
                        self.current = None;
                        continue;
                    }
                    // an open border edge has no cell behind it
                    if let Some(next) = grid.neighbor(id, dir) {
                        grid.set_type(id, CellType::Empty);
                        grid.set_boundary(id, dir, Edge::Wall);
                        self.chain_len += 1;
                        self.pruned += 1;
                        self.current = Some(next);
                        return Some(PruneStep { cell: id, next, dir });
                    }
                }
                self.current = None;
            }

            let head = *self.dead_ends.get(self.next_chain)?;
            self.next_chain += 1;
            self.current = Some(head);
            self.chain_len = 0;
        }
    }
}

/// Prune every dead end and return the number of erased cells
pub fn remove_dead_ends(grid: &mut Grid, start: Option<CellId>) -> usize {
    let mut pruner = DeadEndPruner::new(grid, start);
    while pruner.step(grid).is_some() {}
    debug!(
        "pruned {} corridor cell(s) from {} dead end(s)",
        pruner.pruned(),
        pruner.dead_ends().len()
    );
    pruner.pruned()
}
