//! Grid model: cells, edges and directions
//!
//! Cells live in a flat arena indexed by `x + y * width`. Edge state is
//! stored on both sides of every boundary, and [`Grid::set_boundary`] is the
//! only way to change it, so the two sides never disagree.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::room::RoomId;

/// Cell identity: `x + y * width`
pub type CellId = usize;

/// Compass direction; North is `+y`, East is `+x`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Direction {
    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit step `(dx, dy)`
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Single-direction mask
    pub const fn mask(self) -> Directions {
        match self {
            Direction::North => Directions::NORTH,
            Direction::South => Directions::SOUTH,
            Direction::East => Directions::EAST,
            Direction::West => Directions::WEST,
        }
    }
}

bitflags! {
    /// Set of directions (wall or opening masks)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Directions: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST = 0x04;
        const WEST = 0x08;
    }
}

impl Directions {
    /// The only direction in the mask, if it holds exactly one
    pub fn single(self) -> Option<Direction> {
        if self.bits().count_ones() != 1 {
            return None;
        }
        Direction::iter().find(|dir| self.contains(dir.mask()))
    }
}

/// State of one cell boundary
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Edge {
    Open,
    #[default]
    Wall,
    Door,
}

/// What occupies a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum CellType {
    #[default]
    Empty,
    Corridor,
    Room,
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    id: CellId,
    x: u32,
    y: u32,
    typ: CellType,
    /// Indexed by `Direction as usize`
    edges: [Edge; 4],
    room: Option<RoomId>,
}

impl Cell {
    /// Create an empty cell with all four walls up
    pub const fn new(id: CellId, x: u32, y: u32) -> Self {
        Self {
            id,
            x,
            y,
            typ: CellType::Empty,
            edges: [Edge::Wall; 4],
            room: None,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn cell_type(&self) -> CellType {
        self.typ
    }

    /// Room this cell belongs to, if any
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }

    pub fn edge(&self, dir: Direction) -> Edge {
        self.edges[dir as usize]
    }

    /// Edges in North, South, East, West order
    pub fn edges(&self) -> [Edge; 4] {
        self.edges
    }

    /// Mask of the directions whose edge is `Wall`
    pub fn walls(&self) -> Directions {
        self.mask_of(Edge::Wall)
    }

    /// Mask of the directions whose edge is `Open`
    pub fn open_edges(&self) -> Directions {
        self.mask_of(Edge::Open)
    }

    pub fn wall_count(&self) -> u32 {
        self.walls().bits().count_ones()
    }

    /// Anything that is not a wall lets a walker through
    pub fn is_passable(&self, dir: Direction) -> bool {
        self.edge(dir) != Edge::Wall
    }

    fn mask_of(&self, edge: Edge) -> Directions {
        Direction::iter()
            .filter(|dir| self.edges[*dir as usize] == edge)
            .fold(Directions::empty(), |mask, dir| mask | dir.mask())
    }
}

/// Fixed-size rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate `width × height` empty, fully walled cells
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let id = x as usize + y as usize * width as usize;
                cells.push(Cell::new(id, x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a signed coordinate lies inside the grid
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    pub fn id_of(&self, x: u32, y: u32) -> CellId {
        x as usize + y as usize * self.width as usize
    }

    pub fn position_of(&self, id: CellId) -> (u32, u32) {
        let w = self.width as usize;
        ((id % w) as u32, (id / w) as u32)
    }

    /// Cell by id
    ///
    /// Ids always come from this grid, so out-of-range ids are a bug.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    /// Cell by position, `None` outside the grid
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.id_of(x, y)])
        } else {
            None
        }
    }

    /// All cells in id (row-major) order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Neighbor one step in `dir`, `None` past the border
    pub fn neighbor(&self, id: CellId, dir: Direction) -> Option<CellId> {
        let (x, y) = self.position_of(id);
        let (dx, dy) = dir.delta();
        let (nx, ny) = (x as i64 + dx, y as i64 + dy);
        if self.in_bounds(nx, ny) {
            Some(self.id_of(nx as u32, ny as u32))
        } else {
            None
        }
    }

    pub fn set_type(&mut self, id: CellId, typ: CellType) {
        self.cells[id].typ = typ;
    }

    pub(crate) fn set_room(&mut self, id: CellId, room: Option<RoomId>) {
        self.cells[id].room = room;
    }

    /// Set the boundary on `dir` of `id` and the facing edge of its neighbor
    ///
    /// On the grid border only the cell's own edge exists.
    pub fn set_boundary(&mut self, id: CellId, dir: Direction, edge: Edge) {
        self.cells[id].edges[dir as usize] = edge;
        if let Some(other) = self.neighbor(id, dir) {
            self.cells[other].edges[dir.opposite() as usize] = edge;
        }
    }

    /// Number of cells of the given type
    pub fn count_of(&self, typ: CellType) -> usize {
        self.cells.iter().filter(|c| c.typ == typ).count()
    }

    /// First cell of the given type in id order
    pub fn first_of(&self, typ: CellType) -> Option<CellId> {
        self.cells.iter().find(|c| c.typ == typ).map(|c| c.id)
    }

    /// Check that every shared boundary agrees on both sides
    pub fn edges_consistent(&self) -> bool {
        self.cells.iter().all(|cell| {
            [Direction::North, Direction::East].into_iter().all(|dir| {
                match self.neighbor(cell.id, dir) {
                    Some(other) => cell.edge(dir) == self.cells[other].edge(dir.opposite()),
                    None => true,
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty_and_walled() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.len(), 15);
        for cell in grid.cells() {
            assert_eq!(cell.cell_type(), CellType::Empty);
            assert_eq!(cell.edges(), [Edge::Wall; 4]);
            assert_eq!(cell.wall_count(), 4);
            assert_eq!(cell.room(), None);
        }
    }

    #[test]
    fn test_ids_are_row_major() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.id_of(0, 0), 0);
        assert_eq!(grid.id_of(4, 0), 4);
        assert_eq!(grid.id_of(1, 2), 11);
        assert_eq!(grid.position_of(11), (1, 2));
        assert_eq!(grid.get(1, 2).map(Cell::id), Some(11));
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(0, 3).is_none());
    }

    #[test]
    fn test_neighbors_respect_border() {
        let grid = Grid::new(3, 3);
        let origin = grid.id_of(0, 0);
        assert_eq!(grid.neighbor(origin, Direction::North), Some(grid.id_of(0, 1)));
        assert_eq!(grid.neighbor(origin, Direction::East), Some(grid.id_of(1, 0)));
        assert_eq!(grid.neighbor(origin, Direction::South), None);
        assert_eq!(grid.neighbor(origin, Direction::West), None);
    }

    #[test]
    fn test_set_boundary_updates_both_sides() {
        let mut grid = Grid::new(3, 3);
        let center = grid.id_of(1, 1);
        grid.set_boundary(center, Direction::North, Edge::Open);
        grid.set_boundary(center, Direction::West, Edge::Door);

        let above = grid.id_of(1, 2);
        let left = grid.id_of(0, 1);
        assert_eq!(grid.cell(above).edge(Direction::South), Edge::Open);
        assert_eq!(grid.cell(left).edge(Direction::East), Edge::Door);
        assert!(grid.edges_consistent());

        assert_eq!(grid.cell(center).wall_count(), 2);
        assert_eq!(grid.cell(center).open_edges(), Directions::NORTH);
        assert!(grid.cell(center).is_passable(Direction::West));
        assert!(!grid.cell(center).is_passable(Direction::East));
    }

    #[test]
    fn test_set_boundary_on_border() {
        let mut grid = Grid::new(2, 2);
        grid.set_boundary(0, Direction::South, Edge::Open);
        assert_eq!(grid.cell(0).edge(Direction::South), Edge::Open);
        assert!(grid.edges_consistent());
    }

    #[test]
    fn test_direction_helpers() {
        for dir in Direction::iter() {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dir.mask().single(), Some(dir));
        }
        assert_eq!((Directions::NORTH | Directions::EAST).single(), None);
        assert_eq!(Directions::empty().single(), None);
    }

    #[test]
    fn test_count_and_first_of() {
        let mut grid = Grid::new(4, 2);
        grid.set_type(5, CellType::Corridor);
        grid.set_type(6, CellType::Corridor);
        assert_eq!(grid.count_of(CellType::Corridor), 2);
        assert_eq!(grid.count_of(CellType::Empty), 6);
        assert_eq!(grid.first_of(CellType::Corridor), Some(5));
        assert_eq!(grid.first_of(CellType::Room), None);
    }
}
