//! Knowledge gathered about the labyrinth so far.
//!
//! `MazeMap` keeps one record per cell of the grid (visited flag and the
//! connectivity graph's adjacency list) together with the frontier of cells
//! that are known reachable but not yet explored.

use tracing::debug;

use crate::error::{LabyError, Result};
use crate::frontier::Frontier;
use crate::geometry::{Cell, Heading};
use crate::walls::Walls;

#[derive(Debug, Clone, Default)]
pub struct CellRecord {
    pub visited: bool,
    /// Cells reachable in one move, straight or corner-cut.
    pub neighbors: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub struct MazeMap {
    columns: i32,
    rows: i32,
    goal: Cell,
    records: Vec<CellRecord>,
    frontier: Frontier,
    visited_count: usize,
}

impl MazeMap {
    /// Creates an empty map of `columns × rows` cells.
    pub fn new(columns: i32, rows: i32, goal: Cell) -> Result<Self> {
        if columns <= 0 || rows <= 0 {
            return Err(LabyError::MalformedInput(format!(
                "grid of {columns}x{rows} cells"
            )));
        }
        let size = (columns as usize) * (rows as usize);
        let map = Self {
            columns,
            rows,
            goal,
            records: vec![CellRecord::default(); size],
            frontier: Frontier::new(),
            visited_count: 0,
        };
        if !map.contains(goal) {
            return Err(LabyError::OutOfBounds(goal));
        }
        Ok(map)
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.columns && cell.y < self.rows
    }

    /// Dense index of a cell, column-major like the game's `[x][y]` arrays.
    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.x as usize) * (self.rows as usize) + cell.y as usize)
    }

    pub fn cell_count(&self) -> usize {
        self.records.len()
    }

    fn record_mut(&mut self, cell: Cell) -> Result<&mut CellRecord> {
        let index = self.index(cell).ok_or(LabyError::OutOfBounds(cell))?;
        Ok(&mut self.records[index])
    }

    pub fn record(&self, cell: Cell) -> Option<&CellRecord> {
        self.index(cell).map(|i| &self.records[i])
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.record(cell).is_some_and(|r| r.visited)
    }

    /// Neighbours in the connectivity graph; empty outside the grid.
    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        self.record(cell).map_or(&[], |r| r.neighbors.as_slice())
    }

    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        self.neighbors(a).contains(&b)
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Cells not stood on yet (nor pruned as surrounded).
    pub fn unexplored(&self) -> usize {
        self.cell_count() - self.visited_count
    }

    /// Adds the undirected edge `a <-> b` unless it is already known.
    pub fn record_adjacency(&mut self, a: Cell, b: Cell) -> Result<()> {
        if !a.is_adjacent_to(b) {
            return Err(LabyError::NotAdjacent(a, b));
        }
        if !self.contains(b) {
            return Err(LabyError::OutOfBounds(b));
        }
        if self.has_edge(a, b) {
            return Ok(());
        }
        self.record_mut(a)?.neighbors.push(b);
        self.record_mut(b)?.neighbors.push(a);
        Ok(())
    }

    fn mark_visited(&mut self, cell: Cell) -> Result<()> {
        let record = self.record_mut(cell)?;
        if !record.visited {
            record.visited = true;
            self.visited_count += 1;
        }
        self.frontier.remove(cell);
        Ok(())
    }

    /// Integrates the walls revealed while standing on `cell`.
    ///
    /// Walls never change, so a cell that is already visited is not read
    /// again.
    pub fn observe(&mut self, cell: Cell, walls: &Walls) -> Result<()> {
        if !self.contains(cell) {
            return Err(LabyError::OutOfBounds(cell));
        }
        if self.is_visited(cell) {
            return Ok(());
        }
        self.mark_visited(cell)?;

        for heading in walls.open_headings() {
            let adjacent = cell.step(heading);
            if !self.contains(adjacent) {
                return Err(LabyError::OutOfBounds(adjacent));
            }
            if !self.is_visited(adjacent)
                && adjacent != self.goal
                && self.frontier.insert(adjacent)
            {
                debug!("Frontier += {}", adjacent);
            }
            self.record_adjacency(cell, adjacent)?;
        }

        // Must run after the straight edges above so this tick's openings count.
        let first_ring = self.neighbors(cell).to_vec();
        for n in first_ring {
            let second_ring = self.neighbors(n).to_vec();
            for nn in second_ring {
                if cell.is_diagonal_to(nn) {
                    self.record_adjacency(cell, nn)?;
                }
            }
        }
        Ok(())
    }

    /// True when every in-grid cell around `cell` is visited. Such a cell has
    /// nothing left to reveal: it is dropped from the frontier and counted
    /// as visited.
    pub fn is_surrounded(&mut self, cell: Cell) -> bool {
        let enclosed = Heading::ALL
            .into_iter()
            .map(|h| cell.step(h))
            .filter(|n| self.contains(*n))
            .all(|n| self.is_visited(n));

        if enclosed && self.mark_visited(cell).is_ok() {
            debug!("Frontier -= {} (surrounded)", cell);
        }
        enclosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(mask: u8) -> Walls {
        Walls::from_mask(mask).unwrap()
    }

    fn assert_symmetric(map: &MazeMap) {
        for x in 0..map.columns() {
            for y in 0..map.rows() {
                let a = Cell::new(x, y);
                for &b in map.neighbors(a) {
                    assert!(map.has_edge(b, a), "{a} -> {b} is not mirrored");
                }
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(MazeMap::new(0, 3, Cell::new(0, 0)).is_err());
        assert!(matches!(
            MazeMap::new(3, 3, Cell::new(3, 0)),
            Err(LabyError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_record_adjacency_is_symmetric_and_idempotent() {
        let mut map = MazeMap::new(3, 3, Cell::new(2, 2)).unwrap();
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 0);
        map.record_adjacency(a, b).unwrap();
        map.record_adjacency(a, b).unwrap();
        map.record_adjacency(b, a).unwrap();
        assert_eq!(map.neighbors(a), &[b]);
        assert_eq!(map.neighbors(b), &[a]);
        assert_symmetric(&map);
    }

    #[test]
    fn test_record_adjacency_rejects_jumps() {
        let mut map = MazeMap::new(3, 3, Cell::new(2, 2)).unwrap();
        assert!(matches!(
            map.record_adjacency(Cell::new(0, 0), Cell::new(2, 0)),
            Err(LabyError::NotAdjacent(_, _))
        ));
        assert!(matches!(
            map.record_adjacency(Cell::new(0, 0), Cell::new(-1, 0)),
            Err(LabyError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_first_tick_on_open_two_by_two() {
        let mut map = MazeMap::new(2, 2, Cell::new(1, 1)).unwrap();
        // North and West are the outer border, East and South are open.
        map.observe(Cell::new(0, 0), &open(0b1001)).unwrap();

        assert!(map.is_visited(Cell::new(0, 0)));
        assert_eq!(
            map.frontier().iter().collect::<Vec<_>>(),
            vec![Cell::new(0, 1), Cell::new(1, 0)]
        );
        // Neither leg has been stood on yet, so no corner is cut.
        assert!(!map.has_edge(Cell::new(0, 0), Cell::new(1, 1)));
        assert_eq!(map.neighbors(Cell::new(0, 0)).len(), 2);
    }

    #[test]
    fn test_corner_cut_after_both_legs_known() {
        let mut map = MazeMap::new(2, 2, Cell::new(1, 1)).unwrap();
        map.observe(Cell::new(0, 0), &open(0b1001)).unwrap();
        map.observe(Cell::new(1, 0), &open(0b1100)).unwrap();

        // (1,0) opens South onto (1,1); the corner (0,1) <-> (1,0) only needs
        // both legs through (0,0), which are known.
        assert!(map.has_edge(Cell::new(1, 0), Cell::new(0, 1)));
        assert!(map.has_edge(Cell::new(1, 0), Cell::new(1, 1)));
        assert_symmetric(&map);

        // Goal is never queued for exploration.
        assert!(!map.frontier().contains(Cell::new(1, 1)));
    }

    #[test]
    fn test_observe_visited_cell_is_noop() {
        let mut map = MazeMap::new(3, 1, Cell::new(2, 0)).unwrap();
        map.observe(Cell::new(0, 0), &open(0b1011)).unwrap();
        let before = map.neighbors(Cell::new(0, 0)).to_vec();
        map.observe(Cell::new(0, 0), &open(0b1011)).unwrap();
        assert_eq!(map.neighbors(Cell::new(0, 0)), before.as_slice());
        assert_eq!(map.visited_count(), 1);
    }

    #[test]
    fn test_observe_rejects_opening_outside_grid() {
        let mut map = MazeMap::new(2, 2, Cell::new(1, 1)).unwrap();
        assert!(matches!(
            map.observe(Cell::new(0, 0), &open(0)),
            Err(LabyError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_frontier_cells_are_never_readded() {
        let mut map = MazeMap::new(3, 1, Cell::new(2, 0)).unwrap();
        map.observe(Cell::new(0, 0), &open(0b1011)).unwrap();
        assert!(map.frontier().contains(Cell::new(1, 0)));
        map.observe(Cell::new(1, 0), &open(0b1010)).unwrap();
        assert!(!map.frontier().contains(Cell::new(1, 0)));
        // Walking back over (0,0) does not requeue anything.
        map.observe(Cell::new(0, 0), &open(0b1011)).unwrap();
        assert!(map.frontier().is_empty());
    }

    #[test]
    fn test_is_surrounded_prunes_frontier() {
        let mut map = MazeMap::new(2, 2, Cell::new(1, 1)).unwrap();
        map.observe(Cell::new(0, 0), &open(0b1001)).unwrap();
        assert!(!map.is_surrounded(Cell::new(1, 0)));

        map.observe(Cell::new(0, 1), &open(0b0011)).unwrap();
        // (1,0) still has the unvisited goal next to it.
        assert!(!map.is_surrounded(Cell::new(1, 0)));
        map.observe(Cell::new(1, 1), &open(0b0110)).unwrap();

        let unexplored = map.unexplored();
        assert!(map.is_surrounded(Cell::new(1, 0)));
        assert!(map.is_visited(Cell::new(1, 0)));
        assert!(map.frontier().is_empty());
        assert_eq!(map.unexplored(), unexplored - 1);
    }
}
