//! Exit selection

use log::debug;

use crate::grid::{CellId, CellType, Grid};
use crate::rng::DungeonRng;
use crate::room::Room;

/// Pick the exit cell
///
/// With dead ends pruned, corridors are mostly through-passages, so the exit
/// always goes into a room. Otherwise a coin flip picks a room cell or a
/// corridor cell other than the start. When the chosen kind has no candidate
/// the other kind is used, and the start itself is the last resort.
pub fn select_exit(
    grid: &Grid,
    rooms: &[Room],
    start: Option<CellId>,
    dead_ends_removed: bool,
    rng: &mut DungeonRng,
) -> Option<CellId> {
    let prefer_room = dead_ends_removed || rng.coin_flip();

    let exit = if prefer_room {
        room_exit(rooms, rng).or_else(|| corridor_exit(grid, start, rng))
    } else {
        corridor_exit(grid, start, rng).or_else(|| room_exit(rooms, rng))
    };

    match exit {
        Some(id) => debug!("exit at cell {id} (prefer room: {prefer_room})"),
        None => debug!("no cell available for an exit"),
    }
    exit
}

/// Random cell of a random room
fn room_exit(rooms: &[Room], rng: &mut DungeonRng) -> Option<CellId> {
    rng.choose(rooms)?.random_cell(rng)
}

/// Random corridor cell other than the start, or the start if it is alone
///
/// The start is left out of the draw on purpose so the exit never lands on
/// the entry while another corridor cell exists.
fn corridor_exit(grid: &Grid, start: Option<CellId>, rng: &mut DungeonRng) -> Option<CellId> {
    let candidates: Vec<CellId> = grid
        .cells()
        .filter(|c| c.cell_type() == CellType::Corridor && Some(c.id()) != start)
        .map(|c| c.id())
        .collect();

    match rng.choose(&candidates) {
        Some(&id) => Some(id),
        None => start.filter(|&id| grid.cell(id).cell_type() == CellType::Corridor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_at(grid: &mut Grid, id: usize, x: u32, y: u32) -> Room {
        let mut room = Room::new(id, x, y, 2, 2);
        for cy in y..y + 2 {
            for cx in x..x + 2 {
                let cell = grid.id_of(cx, cy);
                grid.set_type(cell, CellType::Room);
                room.cells.push(cell);
            }
        }
        room
    }

    #[test]
    fn test_pruned_dungeons_exit_in_rooms() {
        let mut grid = Grid::new(6, 6);
        let rooms = vec![room_at(&mut grid, 0, 1, 1)];
        for id in [0, 1, 2] {
            grid.set_type(id, CellType::Corridor);
        }
        for seed in 0..50 {
            let mut rng = DungeonRng::new(seed);
            let exit = select_exit(&grid, &rooms, Some(0), true, &mut rng).unwrap();
            assert!(rooms[0].cells.contains(&exit));
        }
    }

    #[test]
    fn test_coin_flip_uses_both_kinds() {
        let mut grid = Grid::new(6, 6);
        let rooms = vec![room_at(&mut grid, 0, 3, 3)];
        for id in [0, 1, 2, 3] {
            grid.set_type(id, CellType::Corridor);
        }

        let (mut in_room, mut in_corridor) = (0, 0);
        for seed in 0..100 {
            let mut rng = DungeonRng::new(seed);
            let exit = select_exit(&grid, &rooms, Some(0), false, &mut rng).unwrap();
            assert_ne!(exit, 0);
            match grid.cell(exit).cell_type() {
                CellType::Room => in_room += 1,
                CellType::Corridor => in_corridor += 1,
                CellType::Empty => panic!("exit on an empty cell"),
            }
        }
        assert!(in_room > 0 && in_corridor > 0);
    }

    #[test]
    fn test_falls_back_to_other_kind() {
        // no rooms: the room rule has nothing, corridors are used
        let mut grid = Grid::new(3, 1);
        for id in 0..3 {
            grid.set_type(id, CellType::Corridor);
        }
        let mut rng = DungeonRng::new(4);
        let exit = select_exit(&grid, &[], Some(0), true, &mut rng);
        assert!(matches!(exit, Some(1 | 2)));
    }

    #[test]
    fn test_lone_start_is_the_exit() {
        let mut grid = Grid::new(1, 1);
        grid.set_type(0, CellType::Corridor);
        for prune in [false, true] {
            for seed in 0..10 {
                let mut rng = DungeonRng::new(seed);
                assert_eq!(select_exit(&grid, &[], Some(0), prune, &mut rng), Some(0));
            }
        }
    }

    #[test]
    fn test_nothing_available() {
        let grid = Grid::new(2, 2);
        let mut rng = DungeonRng::new(0);
        assert_eq!(select_exit(&grid, &[], None, false, &mut rng), None);
    }
}
