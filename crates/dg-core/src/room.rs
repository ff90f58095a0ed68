//! Rooms and randomized room placement
//!
//! A room is an axis-aligned rectangle of `Room` cells. Placement picks a
//! random corner and size, and keeps the candidate only if the footprint
//! grown by the minimum spacing is entirely inside the grid and still empty.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::grid::{CellId, CellType, Direction, Edge, Grid};
use crate::rng::DungeonRng;

/// Room identity, sequential from 0 in placement order
pub type RoomId = usize;

/// A placed rectangular room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Identity (index in the dungeon's room list)
    pub id: RoomId,
    /// X coordinate of the bottom-left cell
    pub x: u32,
    /// Y coordinate of the bottom-left cell
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Member cells in row-major order
    pub cells: Vec<CellId>,
    /// Doors touching this room, including ones punched by neighbors
    pub door_count: u32,
}

impl Room {
    /// Create a room with no cells registered yet
    pub fn new(id: RoomId, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            cells: Vec::with_capacity(width as usize * height as usize),
            door_count: 0,
        }
    }

    /// Check if point is inside the room
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Get bounds as (left, bottom, right, top), inclusive
    ///
    /// A zero-sized room collapses to its corner.
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.x,
            self.y,
            (self.x + self.width).saturating_sub(1).max(self.x),
            (self.y + self.height).saturating_sub(1).max(self.y),
        )
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Check if a point sits on the room's outer ring
    pub fn is_boundary(&self, x: u32, y: u32) -> bool {
        let (lx, ly, hx, hy) = self.bounds();
        self.contains(x, y) && (x == lx || x == hx || y == ly || y == hy)
    }

    /// Cells on the outer ring, row-major
    pub fn boundary_cells(&self, grid: &Grid) -> Vec<CellId> {
        self.cells
            .iter()
            .copied()
            .filter(|&id| {
                let (x, y) = grid.position_of(id);
                self.is_boundary(x, y)
            })
            .collect()
    }

    /// Uniformly random member cell
    pub fn random_cell(&self, rng: &mut DungeonRng) -> Option<CellId> {
        rng.choose(&self.cells).copied()
    }

    pub fn add_door(&mut self) {
        self.door_count += 1;
    }
}

/// Check that a box given by signed corner and size is inside the grid and empty
pub fn box_is_free(grid: &Grid, x: i64, y: i64, width: i64, height: i64) -> bool {
    for bx in x..x + width {
        for by in y..y + height {
            if !grid.in_bounds(bx, by) {
                return false;
            }
            if grid.cell(grid.id_of(bx as u32, by as u32)).cell_type() != CellType::Empty {
                return false;
            }
        }
    }
    true
}

/// Place up to `max_attempts` rooms and mark their cells
///
/// RNG order per attempt: corner x, corner y, width, height.
pub fn place_rooms(grid: &mut Grid, config: &DungeonConfig, rng: &mut DungeonRng) -> Vec<Room> {
    let spacing = config.min_room_spacing() as i64;
    let sizes = config.room_size;
    let mut rooms = Vec::new();

    for attempt in 0..config.max_attempts {
        let (x, y) = rng.random_coord(grid.width(), grid.height());
        let width = rng.range(sizes.min as i64, sizes.max as i64 + 1);
        let height = rng.range(sizes.min as i64, sizes.max as i64 + 1);

        let fits = box_is_free(
            grid,
            x as i64 - spacing,
            y as i64 - spacing,
            width + spacing * 2,
            height + spacing * 2,
        );
        if !fits {
            trace!("attempt {attempt}: {width}x{height} room at ({x}, {y}) rejected");
            continue;
        }

        let room = carve_room(grid, rooms.len(), x, y, width as u32, height as u32);
        trace!(
            "attempt {attempt}: placed room {} ({}x{}) at ({x}, {y})",
            room.id, room.width, room.height
        );
        rooms.push(room);
    }

    debug!(
        "placed {} rooms in {} attempts (spacing {spacing})",
        rooms.len(),
        config.max_attempts
    );
    rooms
}

/// Mark a footprint as room cells, open its interior edges and register cells
pub(crate) fn carve_room(grid: &mut Grid, id: RoomId, x: u32, y: u32, width: u32, height: u32) -> Room {
    let mut room = Room::new(id, x, y, width, height);

    for cy in y..y + height {
        for cx in x..x + width {
            let cell = grid.id_of(cx, cy);
            grid.set_type(cell, CellType::Room);
            grid.set_room(cell, Some(id));

            // Outward edges keep their walls; only links to the east and
            // north inside the footprint need opening.
            if cx + 1 < x + width {
                grid.set_boundary(cell, Direction::East, Edge::Open);
            }
            if cy + 1 < y + height {
                grid.set_boundary(cell, Direction::North, Edge::Open);
            }

            room.cells.push(cell);
        }
    }

    room
}
