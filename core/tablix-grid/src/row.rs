//! FILENAME: core/tablix-grid/src/row.rs
//! PURPOSE: A grid row - the owner of the cell pool.
//! CONTEXT: Every cell is allocated by exactly one row and stays in that
//! row's pool for the row's lifetime. Each frame the row hands out cells
//! from the front of the pool (`realized_count` grows), and at the end of
//! the frame everything that was bound last frame but not reused this frame
//! is unbound and cleared. Cells are never freed individually.
//!
//! POOL LAYOUT:
//! `allocated[..realized_count]` - handed out this frame
//! `allocated[..bound_count]`    - still bound from the previous frame
//! `allocated[bound_count..]`    - spare, pre-allocated by batch growth

use log::trace;
use smallvec::SmallVec;

use crate::arena::{CellArena, CellId, RowId};
use crate::axis::{Axis, AxisItem, AxisSizing, MoveDirection, Pixels};
use crate::cell::{Cell, CellRole};
use crate::column::TablixColumn;
use crate::config::GridConfig;
use crate::presenter::{AxisPresenter, GridHost};

#[derive(Debug)]
pub struct TablixRow {
    id: RowId,
    pub(crate) index: usize,
    pub(crate) realized: bool,
    allocated: Vec<CellId>,
    realized_count: usize,
    bound_count: usize,
    corner_cells: SmallVec<[CellId; 2]>,
    row_headers: SmallVec<[CellId; 4]>,
    column_headers: SmallVec<[CellId; 8]>,
    body_cells: SmallVec<[CellId; 8]>,
    sizing: AxisSizing,
}

impl TablixRow {
    pub(crate) fn new(
        id: RowId,
        index: usize,
        presenter: Box<dyn AxisPresenter>,
        config: &GridConfig,
    ) -> Self {
        TablixRow {
            id,
            index,
            realized: false,
            allocated: Vec::with_capacity(config.pool.cells_per_row),
            realized_count: 0,
            bound_count: 0,
            corner_cells: SmallVec::new(),
            row_headers: SmallVec::new(),
            column_headers: SmallVec::new(),
            body_cells: SmallVec::new(),
            sizing: AxisSizing::new(Axis::Vertical, presenter),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Starts a new frame: nothing is realized yet, the pool is untouched.
    pub(crate) fn initialize(&mut self) {
        self.realized = false;
        self.realized_count = 0;
        self.corner_cells.clear();
        self.row_headers.clear();
        self.column_headers.clear();
        self.body_cells.clear();
        self.sizing.set_aligning_size(None);
    }

    pub fn allocated_cells(&self) -> &[CellId] {
        &self.allocated
    }

    pub fn allocated_cell_at(&self, index: usize) -> Option<CellId> {
        self.allocated.get(index).copied()
    }

    pub fn realized_cell_count(&self) -> usize {
        self.realized_count
    }

    pub fn bound_cell_count(&self) -> usize {
        self.bound_count
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

    // ========================================================================
    // POOL
    // ========================================================================

    fn get_or_create_cell(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
        config: &GridConfig,
        role: CellRole,
    ) -> CellId {
        if self.realized_count >= self.allocated.len() {
            let kind = host.layout_kind();
            let row = self.id;
            for _ in 0..config.growth_step() {
                let presenter = host.create_cell_presenter(kind);
                let id = cells.alloc(|id| Cell::new(id, role, Some(row), presenter));
                self.allocated.push(id);
            }
            trace!(target: "tablix", "row {:?} pool grew to {}", self.id, self.allocated.len());
        }
        let id = self.allocated[self.realized_count];
        self.realized_count += 1;
        let cell = &mut cells[id];
        cell.set_role(role);
        cell.set_col_span(1);
        cell.set_row_span(1);
        id
    }

    pub(crate) fn get_or_create_corner_cell(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
        config: &GridConfig,
        column: &mut TablixColumn,
    ) -> CellId {
        let id = self.get_or_create_cell(cells, host, config, CellRole::Corner);
        let cell = &mut cells[id];
        cell.prepare(false);
        column.add_corner_cell(cell);
        self.add_corner_cell(cell);
        id
    }

    pub(crate) fn get_or_create_row_header(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
        config: &GridConfig,
        column: &mut TablixColumn,
        scrollable: bool,
        is_leaf: bool,
    ) -> CellId {
        let id = self.get_or_create_cell(cells, host, config, CellRole::RowHeader);
        let cell = &mut cells[id];
        cell.prepare(scrollable);
        column.add_row_header(cell);
        self.add_row_header(cell, is_leaf);
        id
    }

    pub(crate) fn get_or_create_column_header(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
        config: &GridConfig,
        column: &mut TablixColumn,
        scrollable: bool,
        is_leaf: bool,
    ) -> CellId {
        let id = self.get_or_create_cell(cells, host, config, CellRole::ColumnHeader);
        let cell = &mut cells[id];
        cell.prepare(scrollable);
        column.add_column_header(cell, is_leaf);
        self.add_column_header(cell);
        id
    }

    pub(crate) fn get_or_create_body_cell(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
        config: &GridConfig,
        column: &mut TablixColumn,
        scrollable: bool,
    ) -> CellId {
        let id = self.get_or_create_cell(cells, host, config, CellRole::Body);
        let cell = &mut cells[id];
        cell.prepare(scrollable);
        column.add_body_cell(cell);
        self.add_body_cell(cell);
        id
    }

    pub(crate) fn get_or_create_footer_row_header(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
        config: &GridConfig,
        column: &mut TablixColumn,
    ) -> CellId {
        let id = self.get_or_create_cell(cells, host, config, CellRole::Footer);
        let cell = &mut cells[id];
        cell.prepare(false);
        column.set_footer(cell);
        self.add_row_header(cell, true);
        id
    }

    pub(crate) fn get_or_create_footer_body_cell(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
        config: &GridConfig,
        column: &mut TablixColumn,
        scrollable: bool,
    ) -> CellId {
        let id = self.get_or_create_cell(cells, host, config, CellRole::Footer);
        let cell = &mut cells[id];
        cell.prepare(scrollable);
        column.set_footer(cell);
        self.add_body_cell(cell);
        id
    }

    fn attach(&self, cell: &mut Cell, seed: bool) {
        cell.row = Some(self.id);
        if seed {
            cell.set_content_height(self.sizing.frozen_size());
        }
    }

    pub fn add_corner_cell(&mut self, cell: &mut Cell) {
        self.attach(cell, true);
        self.corner_cells.push(cell.id());
    }

    /// Only leaf row headers take this row's height; outer headers span rows.
    pub fn add_row_header(&mut self, cell: &mut Cell, is_leaf: bool) {
        self.attach(cell, is_leaf);
        self.row_headers.push(cell.id());
    }

    pub fn add_column_header(&mut self, cell: &mut Cell) {
        self.attach(cell, true);
        self.column_headers.push(cell.id());
    }

    pub fn add_body_cell(&mut self, cell: &mut Cell) {
        self.attach(cell, true);
        self.body_cells.push(cell.id());
    }

    // ========================================================================
    // RELEASE
    // ========================================================================

    /// Unbinds and clears the cells bound last frame but not reused this
    /// frame. Returns how many were released.
    pub(crate) fn release_unused_cells(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
    ) -> usize {
        let released = self.release_range(cells, host, self.realized_count);
        self.bound_count = self.realized_count;
        released
    }

    pub(crate) fn release_all_cells(
        &mut self,
        cells: &mut CellArena,
        host: &mut dyn GridHost,
    ) -> usize {
        self.bound_count = self.bound_count.max(self.realized_count);
        self.realized_count = 0;
        self.release_unused_cells(cells, host)
    }

    fn release_range(&self, cells: &mut CellArena, host: &mut dyn GridHost, start: usize) -> usize {
        let end = self.bound_count.min(self.allocated.len());
        if start >= end {
            return 0;
        }
        for &id in &self.allocated[start..end] {
            let cell = &mut cells[id];
            host.unbind_cell(cell);
            cell.clear();
        }
        end - start
    }

    // ========================================================================
    // STRUCTURAL MOVES
    // ========================================================================

    /// Range of the pool holding live scrollable cells: everything after the
    /// leading frozen (non-scrollable) cells, up to the last live cell.
    fn scrollable_range(&self, cells: &CellArena) -> (usize, usize) {
        let live = self.bound_count.max(self.realized_count).min(self.allocated.len());
        let frozen = self.allocated[..live]
            .iter()
            .position(|&id| cells[id].is_scrollable())
            .unwrap_or(live);
        (frozen, live)
    }

    /// Moves the first `count` scrollable cells behind the last live one.
    pub(crate) fn move_scrollable_cells_to_end(
        &mut self,
        cells: &CellArena,
        host: &mut dyn GridHost,
        count: usize,
    ) {
        let (start, end) = self.scrollable_range(cells);
        let n = count.min(end - start);
        if n == 0 {
            return;
        }
        for &id in &self.allocated[start..start + n] {
            host.on_cell_moved(id, MoveDirection::ToEnd);
        }
        self.allocated[start..end].rotate_left(n);
    }

    /// Moves the last `count` live scrollable cells in front of the first one.
    pub(crate) fn move_scrollable_cells_to_start(
        &mut self,
        cells: &CellArena,
        host: &mut dyn GridHost,
        count: usize,
    ) {
        let (start, end) = self.scrollable_range(cells);
        let n = count.min(end - start);
        if n == 0 {
            return;
        }
        for &id in &self.allocated[end - n..end] {
            host.on_cell_moved(id, MoveDirection::ToStart);
        }
        self.allocated[start..end].rotate_right(n);
    }
}

impl AxisItem for TablixRow {
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
            .copied()
            .collect()
    }

    fn index(&self) -> usize {
        self.index
    }

    fn headers(&self) -> &[CellId] {
        &self.row_headers
    }

    fn other_dimension_headers(&self) -> &[CellId] {
        &self.column_headers
    }

    fn scrolling_offset(&self, cells: &CellArena) -> Pixels {
        self.row_headers
            .last()
            .map(|&id| cells[id].vertical_offset())
            .unwrap_or(0.0)
    }
}
