//! Finished dungeon and read-only queries

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::config::DungeonConfig;
use crate::door::Door;
use crate::grid::{Cell, CellId, Direction, Grid};
use crate::room::{Room, RoomId};

/// A generated dungeon
///
/// Holds everything needed to render and walk the layout, plus the seed and
/// configuration that reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    seed: u64,
    config: DungeonConfig,
    grid: Grid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    start: Option<CellId>,
    exit: Option<CellId>,
}

impl Dungeon {
    pub(crate) fn new(
        seed: u64,
        config: DungeonConfig,
        grid: Grid,
        rooms: Vec<Room>,
        doors: Vec<Door>,
        start: Option<CellId>,
        exit: Option<CellId>,
    ) -> Self {
        Self {
            seed,
            config,
            grid,
            rooms,
            doors,
            start,
            exit,
        }
    }

    /// Seed that reproduces this dungeon together with [`Dungeon::config`]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at a position, `None` outside the grid
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.grid.get(x, y)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Entry cell; `None` only when rooms left no free cell
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    pub fn exit(&self) -> Option<CellId> {
        self.exit
    }

    /// Room covering a position
    pub fn room_at(&self, x: u32, y: u32) -> Option<&Room> {
        let id: RoomId = self.cell(x, y)?.room()?;
        self.rooms.get(id)
    }

    /// Cell reached by stepping from `id` toward `dir`
    ///
    /// Open passages and doors can be crossed; walls and the grid border
    /// cannot.
    pub fn can_move(&self, id: CellId, dir: Direction) -> Option<CellId> {
        if id >= self.grid.len() || !self.grid.cell(id).is_passable(dir) {
            return None;
        }
        self.grid.neighbor(id, dir)
    }

    /// Every cell reachable from `id`, sorted by id
    pub fn reachable_from(&self, id: CellId) -> Vec<CellId> {
        if id >= self.grid.len() {
            return Vec::new();
        }

        let mut seen = vec![false; self.grid.len()];
        let mut queue = VecDeque::from([id]);
        seen[id] = true;

        while let Some(current) = queue.pop_front() {
            for dir in Direction::iter() {
                if let Some(next) = self.can_move(current, dir)
                    && !seen[next]
                {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        seen.iter()
            .enumerate()
            .filter_map(|(id, &reached)| reached.then_some(id))
            .collect()
    }

    /// Check whether the exit can be walked to from the start
    pub fn exit_reachable(&self) -> bool {
        match (self.start, self.exit) {
            (Some(start), Some(exit)) => self.reachable_from(start).binary_search(&exit).is_ok(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellType, Edge};

    /// 3x2 layout: a corridor along the bottom, a door up into a one-cell
    /// room at (1, 1), and a walled-off cell at (2, 1)
    fn sample() -> Dungeon {
        let mut grid = Grid::new(3, 2);
        for id in 0..3 {
            grid.set_type(id, CellType::Corridor);
        }
        grid.set_boundary(0, Direction::East, Edge::Open);
        grid.set_boundary(1, Direction::East, Edge::Open);
        grid.set_boundary(1, Direction::North, Edge::Door);

        let room_cell = grid.id_of(1, 1);
        grid.set_type(room_cell, CellType::Room);
        grid.set_room(room_cell, Some(0));
        let mut room = Room::new(0, 1, 1, 1, 1);
        room.cells.push(room_cell);
        room.add_door();

        let door = Door {
            room: 0,
            cell: room_cell,
            outside: 1,
            dir: Direction::South,
            other_room: None,
        };

        Dungeon::new(
            7,
            DungeonConfig::with_seed(7),
            grid,
            vec![room],
            vec![door],
            Some(0),
            Some(room_cell),
        )
    }

    #[test]
    fn test_accessors() {
        let dungeon = sample();
        assert_eq!(dungeon.seed(), 7);
        assert_eq!((dungeon.width(), dungeon.height()), (3, 2));
        assert_eq!(dungeon.cell(1, 1).map(Cell::cell_type), Some(CellType::Room));
        assert!(dungeon.cell(3, 0).is_none());
        assert_eq!(dungeon.doors().len(), 1);
    }

    #[test]
    fn test_room_at() {
        let dungeon = sample();
        assert_eq!(dungeon.room_at(1, 1).map(|r| r.id), Some(0));
        assert!(dungeon.room_at(0, 0).is_none());
        assert!(dungeon.room_at(9, 9).is_none());
    }

    #[test]
    fn test_can_move_through_doors_not_walls() {
        let dungeon = sample();
        assert_eq!(dungeon.can_move(0, Direction::East), Some(1));
        assert_eq!(dungeon.can_move(1, Direction::North), Some(4));
        assert_eq!(dungeon.can_move(4, Direction::South), Some(1));
        assert_eq!(dungeon.can_move(0, Direction::North), None);
        assert_eq!(dungeon.can_move(0, Direction::West), None);
        assert_eq!(dungeon.can_move(99, Direction::North), None);
    }

    #[test]
    fn test_reachable_from() {
        let dungeon = sample();
        assert_eq!(dungeon.reachable_from(0), vec![0, 1, 2, 4]);
        assert_eq!(dungeon.reachable_from(5), vec![5]);
        assert!(dungeon.exit_reachable());
    }

    #[test]
    fn test_serde_roundtrip() {
        let dungeon = sample();
        let json = serde_json::to_string(&dungeon).unwrap();
        let restored: Dungeon = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, dungeon);
    }
}
