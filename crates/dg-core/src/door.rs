//! Door connection between rooms and their surroundings
//!
//! Each room punches a random number of doors through its outer ring. Only
//! cells with mixed coordinate parity are candidates, and only when the cell
//! has exactly one outward wall, which rules out corners.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::grid::{CellId, Direction, Edge, Grid};
use crate::rng::DungeonRng;
use crate::room::{Room, RoomId};

/// A door punched through a room wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Room whose pass created the door
    pub room: RoomId,
    /// Boundary cell inside the room
    pub cell: CellId,
    /// Cell on the other side of the door
    pub outside: CellId,
    /// Direction from `cell` to `outside`
    pub dir: Direction,
    /// Set when `outside` belongs to another room
    pub other_room: Option<RoomId>,
}

/// Connect every room, in id order, and return the doors created
///
/// RNG order per room: boundary shuffle, then the door budget.
pub fn connect_rooms(
    grid: &mut Grid,
    rooms: &mut [Room],
    max_doors_per_room: u32,
    rng: &mut DungeonRng,
) -> Vec<Door> {
    let mut doors = Vec::new();

    for index in 0..rooms.len() {
        let mut boundary = rooms[index].boundary_cells(grid);
        rng.shuffle(&mut boundary);

        let budget = rng.range(1, max_doors_per_room as i64 + 1);
        let to_create = budget - rooms[index].door_count as i64;
        if to_create <= 0 {
            trace!(
                "room {index} already has {} door(s), budget {budget}",
                rooms[index].door_count
            );
            continue;
        }

        let mut created = 0i64;
        for cell in boundary {
            let Some(door) = punch_door(grid, rooms, index, cell) else {
                continue;
            };
            trace!("room {index}: door at cell {cell} facing {}", door.dir);
            doors.push(door);

            created += 1;
            if created == to_create {
                break;
            }
        }

        trace!("room {index}: created {created} of {to_create} door(s)");
    }

    debug!("connected {} rooms with {} doors", rooms.len(), doors.len());
    doors
}

/// Turn the single outward wall of `cell` into a door, if it qualifies
fn punch_door(grid: &mut Grid, rooms: &mut [Room], index: usize, cell: CellId) -> Option<Door> {
    let (x, y) = grid.position_of(cell);
    if x % 2 == y % 2 {
        return None;
    }

    let dir = grid.cell(cell).walls().single()?;
    let outside = grid.neighbor(cell, dir)?;

    grid.set_boundary(cell, dir, Edge::Door);
    rooms[index].add_door();

    let other_room = grid.cell(outside).room().filter(|&other| other != index);
    if let Some(other) = other_room {
        rooms[other].add_door();
    }

    Some(Door {
        room: rooms[index].id,
        cell,
        outside,
        dir,
        other_room,
    })
}
