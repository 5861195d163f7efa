//! FILENAME: core/tablix-grid/src/column.rs
//! PURPOSE: A grid column - every realized cell sharing one horizontal position.
//! CONTEXT: Columns do not own a cell pool (rows do); they collect the cells
//! the rows hand them each frame, grouped by role, and size themselves from
//! the widths of those cells.

use smallvec::SmallVec;

use crate::arena::{CellArena, CellId, ColumnId};
use crate::axis::{Axis, AxisItem, AxisSizing, Pixels, SizeState};
use crate::cell::{Cell, ItemKey};
use crate::presenter::AxisPresenter;

#[derive(Debug)]
pub struct TablixColumn {
    id: ColumnId,
    pub(crate) index: usize,
    pub(crate) realized: bool,
    corner_cells: SmallVec<[CellId; 2]>,
    row_headers: SmallVec<[CellId; 4]>,
    column_headers: SmallVec<[CellId; 4]>,
    body_cells: Vec<CellId>,
    footer: Option<CellId>,
    /// Leaf hierarchy item realized at this column in the latest frame.
    leaf_item: Option<ItemKey>,
    sizing: AxisSizing,
}

impl TablixColumn {
    pub(crate) fn new(id: ColumnId, index: usize, presenter: Box<dyn AxisPresenter>) -> Self {
        TablixColumn {
            id,
            index,
            realized: false,
            corner_cells: SmallVec::new(),
            row_headers: SmallVec::new(),
            column_headers: SmallVec::new(),
            body_cells: Vec::new(),
            footer: None,
            leaf_item: None,
            sizing: AxisSizing::new(Axis::Horizontal, presenter),
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Forgets the previous frame's cells. Sizes are kept.
    pub(crate) fn initialize(&mut self) {
        self.realized = false;
        self.corner_cells.clear();
        self.row_headers.clear();
        self.column_headers.clear();
        self.body_cells.clear();
        self.footer = None;
        self.sizing.set_aligning_size(None);
    }

    fn attach(&self, cell: &mut Cell, seed: bool) {
        cell.column = Some(self.id);
        if seed {
            cell.set_content_width(self.sizing.frozen_size());
        }
    }

    pub fn add_corner_cell(&mut self, cell: &mut Cell) {
        self.attach(cell, true);
        self.corner_cells.push(cell.id());
    }

    pub fn add_row_header(&mut self, cell: &mut Cell) {
        self.attach(cell, true);
        self.row_headers.push(cell.id());
    }

    /// Only leaf headers take this column's width; a non-leaf header spans
    /// several columns and is sized by the grid.
    pub fn add_column_header(&mut self, cell: &mut Cell, is_leaf: bool) {
        self.attach(cell, is_leaf);
        self.column_headers.push(cell.id());
    }

    pub fn add_body_cell(&mut self, cell: &mut Cell) {
        self.attach(cell, true);
        self.body_cells.push(cell.id());
    }

    pub fn set_footer(&mut self, cell: &mut Cell) {
        self.attach(cell, true);
        self.footer = Some(cell.id());
    }

    pub fn footer(&self) -> Option<CellId> {
        self.footer
    }

    pub fn corner_cells(&self) -> &[CellId] {
        &self.corner_cells
    }

    pub fn row_headers(&self) -> &[CellId] {
        &self.row_headers
    }

    pub fn column_headers(&self) -> &[CellId] {
        &self.column_headers
    }

    pub fn body_cells(&self) -> &[CellId] {
        &self.body_cells
    }

    pub fn leaf_item(&self) -> Option<ItemKey> {
        self.leaf_item
    }

    /// Records the leaf item realized at this column. A different leaf than
    /// last frame means the content changed, so a derived size is dropped.
    /// Manual overrides survive.
    pub fn on_leaf_realized(&mut self, item: ItemKey) {
        if self.leaf_item == Some(item) {
            return;
        }
        if self.leaf_item.is_some() && self.sizing.state() != SizeState::Override {
            self.clear_size();
        }
        self.leaf_item = Some(item);
    }
}

impl AxisItem for TablixColumn {
    fn sizing(&self) -> &AxisSizing {
        &self.sizing
    }

    fn sizing_mut(&mut self) -> &mut AxisSizing {
        &mut self.sizing
    }

    fn realized_cells(&self) -> Vec<CellId> {
        self.corner_cells
            .iter()
            .chain(self.row_headers.iter())
            .chain(self.column_headers.iter())
            .chain(self.body_cells.iter())
            .chain(self.footer.iter())
            .copied()
            .collect()
    }

    fn index(&self) -> usize {
        self.index
    }

    fn headers(&self) -> &[CellId] {
        &self.column_headers
    }

    fn other_dimension_headers(&self) -> &[CellId] {
        &self.row_headers
    }

    fn scrolling_offset(&self, cells: &CellArena) -> Pixels {
        self.column_headers
            .last()
            .map(|&id| cells[id].horizontal_offset())
            .unwrap_or(0.0)
    }
}
