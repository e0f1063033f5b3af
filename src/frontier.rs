use std::collections::BTreeSet;

use crate::geometry::Cell;

/// Reachable cells that have not been stood on yet.
///
/// Membership is keyed by cell; iteration is in `Cell` order so that logs
/// and renders are stable between runs.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    cells: BTreeSet<Cell>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns false when the cell was already pending.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}
