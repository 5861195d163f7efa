//! FILENAME: core/tablix-grid/src/grid.rs
//! PURPOSE: The tablix grid - a 2-D collection of pooled rows and columns.
//! CONTEXT: The grid drives the per-frame lifecycle and owns every piece of
//! mutable state: the cell arena, the row and column arenas and the order in
//! which rows and columns are laid out. Rows and columns are addressed by
//! position through `row_order`/`column_order`; their handles (`RowId`,
//! `ColumnId`) stay stable when the order is reshuffled.
//!
//! LIFECYCLE (one render pass):
//! 1. `on_start_rendering_session(clear)` - `clear` tears everything down.
//! 2. `on_start_rendering_iteration` - per-frame bookkeeping is reset.
//! 3. The data-source adapter calls `get_or_create_*` to realize cells.
//! 4. `on_end_rendering_iteration` - cells not reused this pass are released.
//! 5. `fix_sizes` - row heights and column widths are frozen for the frame.
//!
//! Handles issued before a clearing session are invalid afterwards.

use log::{debug, trace, warn};

use crate::arena::{CellArena, CellId, ColumnId, RowId, Slot};
use crate::axis::{Axis, AxisItem, MoveDirection, Pixels, SizeState};
use crate::cell::{Cell, CellRole};
use crate::column::TablixColumn;
use crate::config::GridConfig;
use crate::error::Result;
use crate::presenter::GridHost;
use crate::row::TablixRow;

/// A row or column addressed independently of its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisTarget {
    Row(RowId),
    Column(ColumnId),
}

/// Synthetic cell keeping the header or footer area rectangular.
#[derive(Debug, Clone, Copy)]
struct EmptySpaceCell {
    cell: CellId,
    visible: bool,
}

#[derive(Debug)]
pub struct TablixGrid {
    config: GridConfig,
    cells: CellArena,

    rows: Vec<TablixRow>,
    row_order: Vec<RowId>,
    realized_rows: Vec<RowId>,
    detached_rows: Vec<RowId>,

    columns: Vec<TablixColumn>,
    column_order: Vec<ColumnId>,
    realized_columns: Vec<ColumnId>,
    detached_columns: Vec<ColumnId>,

    /// Lives in the row arena but outside `row_order`.
    footer_row: Option<RowId>,
    footer_active: bool,

    empty_space_header: Option<EmptySpaceCell>,
    empty_space_footer: Option<EmptySpaceCell>,

    /// Bumped by every clearing session; handles from an older session are
    /// stale.
    session: u64,
}

impl TablixGrid {
    pub fn new() -> Self {
        Self::build(GridConfig::default())
    }

    /// Creates a grid after validating `config`.
    pub fn with_config(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GridConfig) -> Self {
        TablixGrid {
            cells: CellArena::new(),
            rows: Vec::with_capacity(config.pool.initial_rows),
            row_order: Vec::with_capacity(config.pool.initial_rows),
            realized_rows: Vec::new(),
            detached_rows: Vec::new(),
            columns: Vec::with_capacity(config.pool.initial_columns),
            column_order: Vec::with_capacity(config.pool.initial_columns),
            realized_columns: Vec::new(),
            detached_columns: Vec::new(),
            footer_row: None,
            footer_active: false,
            empty_space_header: None,
            empty_space_footer: None,
            session: 0,
            config,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Generation of the current rendering session.
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn fill_proportionally(&self) -> bool {
        self.config.fill_proportionally
    }

    pub fn set_fill_proportionally(&mut self, value: bool) {
        self.config.fill_proportionally = value;
    }

    pub fn cells(&self) -> &CellArena {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id]
    }

    pub fn row(&self, id: RowId) -> &TablixRow {
        &self.rows[id.0]
    }

    pub fn row_mut(&mut self, id: RowId) -> &mut TablixRow {
        &mut self.rows[id.0]
    }

    pub fn column(&self, id: ColumnId) -> &TablixColumn {
        &self.columns[id.0]
    }

    pub fn column_mut(&mut self, id: ColumnId) -> &mut TablixColumn {
        &mut self.columns[id.0]
    }

    /// Row at layout position `index`.
    pub fn row_at(&self, index: usize) -> Option<RowId> {
        self.row_order.get(index).copied()
    }

    /// Column at layout position `index`.
    pub fn column_at(&self, index: usize) -> Option<ColumnId> {
        self.column_order.get(index).copied()
    }

    pub fn row_count(&self) -> usize {
        self.row_order.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    pub fn rows_in_order(&self) -> &[RowId] {
        &self.row_order
    }

    pub fn columns_in_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    pub fn realized_rows(&self) -> &[RowId] {
        &self.realized_rows
    }

    pub fn realized_columns(&self) -> &[ColumnId] {
        &self.realized_columns
    }

    /// The footer row, when the row dimension expects one this iteration.
    pub fn footer_row(&self) -> Option<RowId> {
        if self.footer_active {
            self.footer_row
        } else {
            None
        }
    }

    pub fn empty_space_header_cell(&self) -> Option<CellId> {
        self.empty_space_header.filter(|e| e.visible).map(|e| e.cell)
    }

    pub fn empty_space_footer_cell(&self) -> Option<CellId> {
        self.empty_space_footer.filter(|e| e.visible).map(|e| e.cell)
    }

    pub fn axis_item(&self, target: AxisTarget) -> &dyn AxisItem {
        match target {
            AxisTarget::Row(id) => &self.rows[id.0],
            AxisTarget::Column(id) => &self.columns[id.0],
        }
    }

    /// Mutable access to a row or column together with the cell arena its
    /// sizing operations need.
    pub fn axis_item_mut(&mut self, target: AxisTarget) -> (&mut dyn AxisItem, &mut CellArena) {
        match target {
            AxisTarget::Row(id) => (&mut self.rows[id.0], &mut self.cells),
            AxisTarget::Column(id) => (&mut self.columns[id.0], &mut self.cells),
        }
    }

    fn sized_rows(&self) -> Vec<RowId> {
        self.realized_rows.iter().copied().chain(self.footer_row()).collect()
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Starts a render session. With `clear`, every cell is released through
    /// the host and all rows, columns and cells are discarded.
    pub fn on_start_rendering_session(&mut self, host: &mut dyn GridHost, clear: bool) {
        if !clear {
            return;
        }
        let mut released = 0;
        for row in &mut self.rows {
            released += row.release_all_cells(&mut self.cells, host);
        }
        self.hide_empty_space_cells(host);

        self.rows.clear();
        self.row_order.clear();
        self.realized_rows.clear();
        self.detached_rows.clear();
        self.columns.clear();
        self.column_order.clear();
        self.realized_columns.clear();
        self.detached_columns.clear();
        self.footer_row = None;
        self.footer_active = false;
        self.empty_space_header = None;
        self.empty_space_footer = None;
        self.cells.clear();
        self.session += 1;
        debug!(
            target: "tablix",
            "rendering session {} cleared, released {} cells",
            self.session,
            released
        );
    }

    /// Resets per-frame bookkeeping while keeping every pooled object.
    pub fn on_start_rendering_iteration(&mut self, host: &mut dyn GridHost) {
        for column in &mut self.columns {
            column.initialize();
        }
        self.realized_columns.clear();

        for row in &mut self.rows {
            row.initialize();
        }
        self.realized_rows.clear();

        if host.has_footer() {
            if self.footer_row.is_none() {
                let id = self.new_row(host, 0);
                self.footer_row = Some(id);
            }
            self.footer_active = true;
        } else if self.footer_active {
            if let Some(id) = self.footer_row {
                self.rows[id.0].release_all_cells(&mut self.cells, host);
            }
            self.footer_active = false;
        }
        trace!(
            target: "tablix",
            "iteration started rows={} columns={} footer={}",
            self.row_order.len(),
            self.column_order.len(),
            self.footer_active
        );
    }

    /// Releases every cell that was bound last pass but not reused in this
    /// one. Returns the number of released cells.
    pub fn on_end_rendering_iteration(&mut self, host: &mut dyn GridHost) -> usize {
        let mut released = 0;
        for row in &mut self.rows {
            released += row.release_unused_cells(&mut self.cells, host);
        }
        debug!(
            target: "tablix",
            "iteration ended realized_rows={} realized_columns={} released={}",
            self.realized_rows.len(),
            self.realized_columns.len(),
            released
        );
        released
    }

    // ========================================================================
    // ROWS & COLUMNS
    // ========================================================================

    fn new_row(&mut self, host: &mut dyn GridHost, index: usize) -> RowId {
        if let Some(id) = self.detached_rows.pop() {
            self.rows[id.0].index = index;
            return id;
        }
        let id = RowId(self.rows.len());
        let presenter = host.create_axis_presenter(Axis::Vertical);
        self.rows.push(TablixRow::new(id, index, presenter, &self.config));
        id
    }

    fn new_column(&mut self, host: &mut dyn GridHost, index: usize) -> ColumnId {
        if let Some(id) = self.detached_columns.pop() {
            self.columns[id.0].index = index;
            return id;
        }
        let id = ColumnId(self.columns.len());
        let presenter = host.create_axis_presenter(Axis::Horizontal);
        self.columns.push(TablixColumn::new(id, index, presenter));
        id
    }

    /// Returns the row at `index`, creating it (and any missing row before
    /// it) on a miss, and records it as realized for this iteration.
    pub fn get_or_create_row(&mut self, host: &mut dyn GridHost, index: usize) -> RowId {
        while self.row_order.len() <= index {
            let position = self.row_order.len();
            let id = self.new_row(host, position);
            self.row_order.push(id);
        }
        let id = self.row_order[index];
        let row = &mut self.rows[id.0];
        if !row.realized {
            row.realized = true;
            self.realized_rows.push(id);
        }
        id
    }

    /// Column counterpart of `get_or_create_row`.
    pub fn get_or_create_column(&mut self, host: &mut dyn GridHost, index: usize) -> ColumnId {
        while self.column_order.len() <= index {
            let position = self.column_order.len();
            let id = self.new_column(host, position);
            self.column_order.push(id);
        }
        let id = self.column_order[index];
        let column = &mut self.columns[id.0];
        if !column.realized {
            column.realized = true;
            self.realized_columns.push(id);
        }
        id
    }

    /// The footer row for this iteration, `None` when no footer is expected.
    pub fn get_or_create_footer_row(&mut self) -> Option<RowId> {
        self.footer_row()
    }

    // ========================================================================
    // CELLS
    // ========================================================================

    pub fn get_or_create_corner_cell(
        &mut self,
        host: &mut dyn GridHost,
        row: RowId,
        column: ColumnId,
    ) -> CellId {
        self.rows[row.0].get_or_create_corner_cell(
            &mut self.cells,
            host,
            &self.config,
            &mut self.columns[column.0],
        )
    }

    pub fn get_or_create_row_header(
        &mut self,
        host: &mut dyn GridHost,
        row: RowId,
        column: ColumnId,
        scrollable: bool,
        is_leaf: bool,
    ) -> CellId {
        self.rows[row.0].get_or_create_row_header(
            &mut self.cells,
            host,
            &self.config,
            &mut self.columns[column.0],
            scrollable,
            is_leaf,
        )
    }

    pub fn get_or_create_column_header(
        &mut self,
        host: &mut dyn GridHost,
        row: RowId,
        column: ColumnId,
        scrollable: bool,
        is_leaf: bool,
    ) -> CellId {
        self.rows[row.0].get_or_create_column_header(
            &mut self.cells,
            host,
            &self.config,
            &mut self.columns[column.0],
            scrollable,
            is_leaf,
        )
    }

    pub fn get_or_create_body_cell(
        &mut self,
        host: &mut dyn GridHost,
        row: RowId,
        column: ColumnId,
        scrollable: bool,
    ) -> CellId {
        self.rows[row.0].get_or_create_body_cell(
            &mut self.cells,
            host,
            &self.config,
            &mut self.columns[column.0],
            scrollable,
        )
    }

    /// Row header of the footer row. `None` when no footer is active.
    pub fn get_or_create_footer_row_header(
        &mut self,
        host: &mut dyn GridHost,
        column: ColumnId,
    ) -> Option<CellId> {
        let footer = self.footer_row()?;
        Some(self.rows[footer.0].get_or_create_footer_row_header(
            &mut self.cells,
            host,
            &self.config,
            &mut self.columns[column.0],
        ))
    }

    /// Body cell of the footer row. `None` when no footer is active.
    pub fn get_or_create_footer_body_cell(
        &mut self,
        host: &mut dyn GridHost,
        column: ColumnId,
        scrollable: bool,
    ) -> Option<CellId> {
        let footer = self.footer_row()?;
        Some(self.rows[footer.0].get_or_create_footer_body_cell(
            &mut self.cells,
            host,
            &self.config,
            &mut self.columns[column.0],
            scrollable,
        ))
    }

    // ========================================================================
    // STRUCTURAL EDITS
    // ========================================================================

    fn reindex_rows(&mut self) {
        for (position, id) in self.row_order.iter().enumerate() {
            self.rows[id.0].index = position;
        }
    }

    fn reindex_columns(&mut self) {
        for (position, id) in self.column_order.iter().enumerate() {
            self.columns[id.0].index = position;
        }
    }

    /// Moves `count` rows starting at `move_from` behind the last row.
    pub fn move_rows_to_end(&mut self, host: &mut dyn GridHost, move_from: usize, count: usize) {
        let len = self.row_order.len();
        debug_assert!(move_from + count <= len, "row index must exist before moving it");
        if count == 0 || move_from + count > len {
            if count > 0 {
                warn!(
                    target: "tablix",
                    "move_rows_to_end out of range from={} count={} rows={}",
                    move_from,
                    count,
                    len
                );
            }
            return;
        }
        for &id in &self.row_order[move_from..move_from + count] {
            host.on_row_moved(id, MoveDirection::ToEnd);
        }
        self.row_order[move_from..].rotate_left(count);
        self.reindex_rows();
    }

    /// Moves the last `count` rows in front of position `move_to`.
    pub fn move_rows_to_start(&mut self, host: &mut dyn GridHost, move_to: usize, count: usize) {
        let len = self.row_order.len();
        debug_assert!(move_to + count <= len, "row index must exist before moving it");
        if count == 0 || move_to + count > len {
            if count > 0 {
                warn!(
                    target: "tablix",
                    "move_rows_to_start out of range to={} count={} rows={}",
                    move_to,
                    count,
                    len
                );
            }
            return;
        }
        for &id in &self.row_order[len - count..] {
            host.on_row_moved(id, MoveDirection::ToStart);
        }
        self.row_order[move_to..].rotate_right(count);
        self.reindex_rows();
    }

    /// Moves `count` columns starting at `move_from` behind the last column.
    /// Every row relocates its already-allocated scrollable cells along with
    /// them, so the host moves nodes instead of recreating them.
    pub fn move_columns_to_end(&mut self, host: &mut dyn GridHost, move_from: usize, count: usize) {
        let len = self.column_order.len();
        debug_assert!(move_from + count <= len, "column index must exist before moving it");
        if count == 0 || move_from + count > len {
            if count > 0 {
                warn!(
                    target: "tablix",
                    "move_columns_to_end out of range from={} count={} columns={}",
                    move_from,
                    count,
                    len
                );
            }
            return;
        }
        for id in self.row_order.iter().copied().chain(self.footer_row()) {
            self.rows[id.0].move_scrollable_cells_to_end(&self.cells, host, count);
        }
        self.column_order[move_from..].rotate_left(count);
        self.reindex_columns();
    }

    /// Moves the last `count` columns in front of position `move_to`.
    pub fn move_columns_to_start(&mut self, host: &mut dyn GridHost, move_to: usize, count: usize) {
        let len = self.column_order.len();
        debug_assert!(move_to + count <= len, "column index must exist before moving it");
        if count == 0 || move_to + count > len {
            if count > 0 {
                warn!(
                    target: "tablix",
                    "move_columns_to_start out of range to={} count={} columns={}",
                    move_to,
                    count,
                    len
                );
            }
            return;
        }
        for id in self.row_order.iter().copied().chain(self.footer_row()) {
            self.rows[id.0].move_scrollable_cells_to_start(&self.cells, host, count);
        }
        self.column_order[move_to..].rotate_right(count);
        self.reindex_columns();
    }

    /// Inserts an empty row at `index` (clamped to the row count).
    pub fn insert_row(&mut self, host: &mut dyn GridHost, index: usize) -> RowId {
        let index = index.min(self.row_order.len());
        let id = self.new_row(host, index);
        self.row_order.insert(index, id);
        self.reindex_rows();
        id
    }

    /// Inserts an empty column at `index` (clamped to the column count).
    pub fn insert_column(&mut self, host: &mut dyn GridHost, index: usize) -> ColumnId {
        let index = index.min(self.column_order.len());
        let id = self.new_column(host, index);
        self.column_order.insert(index, id);
        self.reindex_columns();
        id
    }

    /// Takes the row at `index` out of the layout. Its cells are released
    /// and the row object is parked for reuse by a later insertion.
    pub fn remove_row(&mut self, host: &mut dyn GridHost, index: usize) -> Option<RowId> {
        if index >= self.row_order.len() {
            return None;
        }
        let id = self.row_order.remove(index);
        let row = &mut self.rows[id.0];
        let released = row.release_all_cells(&mut self.cells, host);
        row.initialize();
        row.clear_size();
        self.realized_rows.retain(|&r| r != id);
        self.detached_rows.push(id);
        self.reindex_rows();
        debug!(target: "tablix", "removed row at {} released={}", index, released);
        Some(id)
    }

    /// Takes the column at `index` out of the layout and parks it for reuse.
    /// Cells it held stay in their rows' pools.
    pub fn remove_column(&mut self, index: usize) -> Option<ColumnId> {
        if index >= self.column_order.len() {
            return None;
        }
        let id = self.column_order.remove(index);
        let column = &mut self.columns[id.0];
        column.initialize();
        column.clear_size();
        self.realized_columns.retain(|&c| c != id);
        self.detached_columns.push(id);
        self.reindex_columns();
        debug!(target: "tablix", "removed column at {}", index);
        Some(id)
    }

    // ========================================================================
    // SIZING
    // ========================================================================

    /// Freezes geometry for the frame: content sizes are computed bottom-up,
    /// spanning headers push aligning sizes down to their last covered item,
    /// every realized row and column is fixed, and spanning cells are sized
    /// to the sum of the items they cover.
    pub fn fix_sizes(&mut self) {
        if self.realized_rows.is_empty() && self.realized_columns.is_empty() {
            return;
        }
        let correction = self.config.ellipsis_correction;
        let rows = self.sized_rows();

        for &id in &self.realized_columns {
            self.columns[id.0].calculate_size(&self.cells);
        }
        for &id in &rows {
            self.rows[id.0].calculate_size(&self.cells);
        }

        let aligned = spanning_alignments(
            &self.columns,
            &self.column_order,
            &self.realized_columns,
            &self.cells,
            correction,
        );
        apply_alignments(&mut self.columns, aligned);
        let aligned = spanning_alignments(
            &self.rows,
            &self.row_order,
            &self.realized_rows,
            &self.cells,
            correction,
        );
        apply_alignments(&mut self.rows, aligned);

        for &id in &self.realized_columns {
            self.columns[id.0].fix_size(&mut self.cells, correction);
        }
        for &id in &rows {
            self.rows[id.0].fix_size(&mut self.cells, correction);
        }

        self.size_spanning_cells();
        trace!(
            target: "tablix",
            "sizes fixed columns={} rows={}",
            self.realized_columns.len(),
            rows.len()
        );
    }

    fn size_spanning_cells(&mut self) {
        let mut widths = Vec::new();
        for &id in &self.realized_columns {
            for cell in self.columns[id.0].realized_cells() {
                let span = self.cells[cell].col_span();
                if span > 1 {
                    let size = spanning_size(
                        &mut self.columns,
                        &self.column_order,
                        &self.cells,
                        id.0,
                        span,
                        true,
                    );
                    widths.push((cell, size));
                }
            }
        }
        for (cell, width) in widths {
            self.cells[cell].set_content_width(Some(width));
        }

        let mut heights = Vec::new();
        for id in self.sized_rows() {
            let in_order = Some(id) != self.footer_row;
            for cell in self.rows[id.0].realized_cells() {
                let span = self.cells[cell].row_span();
                if span > 1 {
                    let size = spanning_size(
                        &mut self.rows,
                        &self.row_order,
                        &self.cells,
                        id.0,
                        span,
                        in_order,
                    );
                    heights.push((cell, size));
                }
            }
        }
        for (cell, height) in heights {
            self.cells[cell].set_content_height(Some(height));
        }
    }

    /// On-screen footprint of `cell` along `axis`: the owning item's size
    /// plus its current scroll offset plus the sizes of the following
    /// `span - 1` items. `None` for a cell not attached along that axis.
    pub fn cell_spanning_size_with_scrolling(
        &mut self,
        axis: Axis,
        cell: CellId,
    ) -> Option<Pixels> {
        let c = self.cells.get(cell)?;
        match axis {
            Axis::Horizontal => {
                let column = c.column()?;
                let span = c.col_span();
                Some(spanning_size(
                    &mut self.columns,
                    &self.column_order,
                    &self.cells,
                    column.0,
                    span,
                    true,
                ))
            }
            Axis::Vertical => {
                let row = c.row()?;
                let span = c.row_span();
                let in_order = Some(row) != self.footer_row;
                Some(spanning_size(
                    &mut self.rows,
                    &self.row_order,
                    &self.cells,
                    row.0,
                    span,
                    in_order,
                ))
            }
        }
    }

    /// Drops every derived size so the next `fix_sizes` measures again.
    /// Manual overrides are kept.
    pub fn clear_sizes(&mut self) {
        for column in &mut self.columns {
            if column.size_state() != SizeState::Override {
                column.clear_size();
            }
        }
        for row in &mut self.rows {
            if row.size_state() != SizeState::Override {
                row.clear_size();
            }
        }
    }

    /// Spreads the space left between the realized columns and `available`
    /// over the columns in proportion to their width. Only applies when
    /// `fill_proportionally` is set; manually sized columns keep their width.
    /// Returns whether any column changed.
    pub fn distribute_width(&mut self, available: Pixels) -> bool {
        if !self.config.fill_proportionally || self.realized_columns.is_empty() {
            return false;
        }
        let correction = self.config.ellipsis_correction;
        let mut total = 0.0;
        let mut flexible = Vec::new();
        for &id in &self.realized_columns {
            let column = &mut self.columns[id.0];
            let size = column.contextual_size();
            total += size;
            if column.size_state() != SizeState::Override && size > 0.0 {
                flexible.push((id, size));
            }
        }
        let flexible_total: Pixels = flexible.iter().map(|(_, size)| size).sum();
        if total >= available || flexible_total <= 0.0 {
            return false;
        }
        let extra = available - total;
        for (id, size) in flexible {
            let column = &mut self.columns[id.0];
            column.set_aligning_size(Some(size + extra * size / flexible_total));
            column.fix_size(&mut self.cells, correction);
        }
        self.size_spanning_cells();
        debug!(target: "tablix", "distributed {} extra pixels over columns", extra);
        true
    }

    // ========================================================================
    // EMPTY SPACE CELLS
    // ========================================================================

    fn alloc_filler(&mut self, host: &mut dyn GridHost, role: CellRole) -> EmptySpaceCell {
        let kind = host.layout_kind();
        let presenter = host.create_cell_presenter(kind);
        let cell = self.cells.alloc(|id| Cell::new(id, role, None, presenter));
        EmptySpaceCell { cell, visible: false }
    }

    fn present_filler(
        &mut self,
        host: &mut dyn GridHost,
        filler: &mut EmptySpaceCell,
        row_span: u32,
        width: Pixels,
    ) {
        let cell = &mut self.cells[filler.cell];
        cell.set_row_span(row_span.max(1));
        cell.set_content_width(Some(width));
        if !filler.visible {
            filler.visible = true;
            host.on_empty_space_cell_shown(filler.cell);
        }
    }

    /// Shows the header filler (and the footer filler when a footer is
    /// active) so the corner area stays rectangular. No-op on an empty grid.
    pub fn show_empty_space_cells(
        &mut self,
        host: &mut dyn GridHost,
        row_span: u32,
        width: Pixels,
    ) {
        if self.realized_rows.is_empty() {
            return;
        }
        let mut header = match self.empty_space_header {
            Some(filler) => filler,
            None => self.alloc_filler(host, CellRole::Corner),
        };
        self.present_filler(host, &mut header, row_span, width);
        self.empty_space_header = Some(header);

        if self.footer_active {
            let mut footer = match self.empty_space_footer {
                Some(filler) => filler,
                None => self.alloc_filler(host, CellRole::Footer),
            };
            self.present_filler(host, &mut footer, 1, width);
            self.empty_space_footer = Some(footer);
        }
    }

    pub fn hide_empty_space_cells(&mut self, host: &mut dyn GridHost) {
        for filler in [&mut self.empty_space_header, &mut self.empty_space_footer]
            .into_iter()
            .flatten()
        {
            if filler.visible {
                filler.visible = false;
                self.cells[filler.cell].clear();
                host.on_empty_space_cell_hidden(filler.cell);
            }
        }
    }
}

impl Default for TablixGrid {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AXIS-GENERIC SIZING HELPERS
// ============================================================================

/// Size an item contributes to a spanning header's coverage. Aligned items
/// count with their local size so the alignment is stable across frames.
fn effective_size<T: AxisItem>(item: &T, correction: Pixels) -> Pixels {
    match item.size_state() {
        SizeState::Override => item.sizing().frozen_size().unwrap_or(0.0),
        _ => item.content_size().map_or(0.0, |size| size + correction),
    }
}

/// Finds spanning headers wider than the items they cover and returns, per
/// last covered item, the size that makes up the difference.
fn spanning_alignments<T: AxisItem, I: Slot>(
    items: &[T],
    order: &[I],
    realized: &[I],
    cells: &CellArena,
    correction: Pixels,
) -> Vec<(usize, Pixels)> {
    let mut alignments = Vec::new();
    for &id in realized {
        let item = &items[id.slot()];
        let axis = item.axis();
        for cell_id in item.realized_cells() {
            let cell = &cells[cell_id];
            let span = cell.span(axis) as usize;
            if span <= 1 {
                continue;
            }
            let required = match axis {
                Axis::Horizontal => cell.measured_content_width(),
                Axis::Vertical => cell.measured_content_height(),
            };
            let required = match required {
                Some(size) => size,
                None => continue,
            };
            let start = item.index();
            let end = (start + span).min(order.len());
            if start >= end {
                continue;
            }
            let covered = &order[start..end];
            let total: Pixels = covered
                .iter()
                .map(|c| effective_size(&items[c.slot()], correction))
                .sum();
            if required <= total {
                continue;
            }
            if let Some(&last) = covered.last() {
                let last_item = &items[last.slot()];
                if last_item.size_state() != SizeState::Override {
                    let widened = effective_size(last_item, correction) + required - total;
                    alignments.push((last.slot(), widened));
                }
            }
        }
    }
    alignments
}

fn apply_alignments<T: AxisItem>(items: &mut [T], alignments: Vec<(usize, Pixels)>) {
    for (slot, size) in alignments {
        let item = &mut items[slot];
        let merged = item.aligning_size().map_or(size, |current| current.max(size));
        item.set_aligning_size(Some(merged));
    }
}

fn spanning_size<T: AxisItem, I: Slot>(
    items: &mut [T],
    order: &[I],
    cells: &CellArena,
    owner: usize,
    span: u32,
    in_order: bool,
) -> Pixels {
    let start = items[owner].index();
    let mut size = items[owner].contextual_size() + items[owner].scrolling_offset(cells);
    if in_order {
        for i in 1..span as usize {
            if let Some(next) = order.get(start + i) {
                size += items[next.slot()].contextual_size();
            }
        }
    }
    size
}
