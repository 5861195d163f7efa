//! FILENAME: core/tablix-grid/src/arena.rs
//! PURPOSE: Stable handles for cells, rows and columns.
//! CONTEXT: Cells sit at the intersection of one row and one column and
//! both need to reach them, so instead of shared pointers every cell lives
//! in a flat arena owned by the grid. Rows and columns hold `CellId`s and
//! cells hold `RowId`/`ColumnId` back-references. Handles are only ever
//! issued by the arena, so indexing with them cannot go out of bounds while
//! the grid that issued them is alive.

use std::ops::{Index, IndexMut};

use crate::cell::Cell;

/// Handle to a pooled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

/// Handle to a row object (stable across row moves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) usize);

/// Handle to a column object (stable across column moves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl RowId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ColumnId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Flat storage for every cell the grid has ever allocated.
#[derive(Default)]
pub struct CellArena {
    cells: Vec<Cell>,
}

impl CellArena {
    pub fn new() -> Self {
        CellArena { cells: Vec::new() }
    }

    /// Stores a new cell, handing it the id it will be known by.
    pub fn alloc(&mut self, build: impl FnOnce(CellId) -> Cell) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(build(id));
        id
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drops every cell. Only valid together with discarding all rows and
    /// columns that hold ids into this arena.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl Index<CellId> for CellArena {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }
}

impl IndexMut<CellId> for CellArena {
    fn index_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }
}

impl std::fmt::Debug for CellArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellArena").field("len", &self.cells.len()).finish()
    }
}

/// Slot of an axis item in its arena, shared by `RowId` and `ColumnId` so
/// sizing helpers can be written once for both axes.
pub(crate) trait Slot: Copy {
    fn slot(self) -> usize;
}

impl Slot for RowId {
    fn slot(self) -> usize {
        self.0
    }
}

impl Slot for ColumnId {
    fn slot(self) -> usize {
        self.0
    }
}
