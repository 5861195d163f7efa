//! FILENAME: core/tablix-grid/src/cell.rs
//! PURPOSE: The pooled cell - the atomic unit the grid realizes and reuses.
//! CONTEXT: A cell owns span, scroll offsets and assigned content size.
//! Everything visible is delegated to its presenter; the setters here only
//! notify the presenter when a value actually changes.

use serde::{Deserialize, Serialize};

use crate::arena::{CellId, ColumnId, RowId};
use crate::axis::{Axis, Pixels};
use crate::presenter::CellPresenter;

// ============================================================================
// CELL METADATA
// ============================================================================

/// The role a cell plays in the tablix layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRole {
    /// Top-left area where row and column headers meet.
    Corner,
    /// Row hierarchy header.
    RowHeader,
    /// Column hierarchy header.
    ColumnHeader,
    /// Intersection of a row leaf and a column leaf.
    Body,
    /// Cell of the footer (totals) row.
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl Default for TextAlign {
    fn default() -> Self {
        TextAlign::Left
    }
}

/// Opaque handle to the data-source item bound into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey(pub u64);

// ============================================================================
// CELL
// ============================================================================

pub struct Cell {
    id: CellId,
    role: CellRole,
    item: Option<ItemKey>,
    col_span: u32,
    row_span: u32,
    text_align: TextAlign,
    horizontal_offset: Pixels,
    vertical_offset: Pixels,
    content_width: Option<Pixels>,
    content_height: Option<Pixels>,
    scrollable: bool,
    pub(crate) row: Option<RowId>,
    pub(crate) column: Option<ColumnId>,
    presenter: Box<dyn CellPresenter>,
}

impl Cell {
    pub(crate) fn new(
        id: CellId,
        role: CellRole,
        row: Option<RowId>,
        mut presenter: Box<dyn CellPresenter>,
    ) -> Self {
        presenter.initialize(id);
        Cell {
            id,
            role,
            item: None,
            col_span: 1,
            row_span: 1,
            text_align: TextAlign::Left,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            content_width: None,
            content_height: None,
            scrollable: false,
            row,
            column: None,
            presenter,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    pub(crate) fn set_role(&mut self, role: CellRole) {
        self.role = role;
    }

    pub fn item(&self) -> Option<ItemKey> {
        self.item
    }

    pub fn bind_item(&mut self, item: ItemKey) {
        self.item = Some(item);
    }

    pub fn row(&self) -> Option<RowId> {
        self.row
    }

    pub fn column(&self) -> Option<ColumnId> {
        self.column
    }

    pub fn col_span(&self) -> u32 {
        self.col_span
    }

    pub fn row_span(&self) -> u32 {
        self.row_span
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn horizontal_offset(&self) -> Pixels {
        self.horizontal_offset
    }

    pub fn vertical_offset(&self) -> Pixels {
        self.vertical_offset
    }

    pub fn content_width(&self) -> Option<Pixels> {
        self.content_width
    }

    pub fn content_height(&self) -> Option<Pixels> {
        self.content_height
    }

    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    /// Width of the rendered content as measured by the presenter.
    pub fn measured_content_width(&self) -> Option<Pixels> {
        self.presenter.content_width()
    }

    /// Height of the rendered content as measured by the presenter.
    pub fn measured_content_height(&self) -> Option<Pixels> {
        self.presenter.content_height()
    }

    pub fn presenter(&self) -> &dyn CellPresenter {
        self.presenter.as_ref()
    }

    pub fn presenter_mut(&mut self) -> &mut dyn CellPresenter {
        self.presenter.as_mut()
    }

    /// Marks whether the cell takes part in scroll-offset cropping for the
    /// binding that follows. Scrolling state never leaks between bindings.
    pub fn prepare(&mut self, scrollable: bool) {
        if self.scrollable {
            self.initialize_scrolling();
        }
        self.scrollable = scrollable;
    }

    pub fn set_content_width(&mut self, width: Option<Pixels>) {
        if width == self.content_width {
            return;
        }
        self.content_width = width;
        self.presenter.on_content_width_changed(width);
    }

    pub fn set_content_height(&mut self, height: Option<Pixels>) {
        if height == self.content_height {
            return;
        }
        self.content_height = height;
        self.presenter.on_content_height_changed(height);
    }

    pub fn set_col_span(&mut self, span: u32) {
        if span != self.col_span {
            self.presenter.on_column_span_changed(span);
            self.col_span = span;
        }
    }

    pub fn set_row_span(&mut self, span: u32) {
        if span != self.row_span {
            self.presenter.on_row_span_changed(span);
            self.row_span = span;
        }
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        if align != self.text_align {
            self.presenter.on_text_align_changed(align);
            self.text_align = align;
        }
    }

    /// Shifts the content left by `fraction` of `width`, exposing the
    /// remaining part as the visible content width.
    pub fn scroll_horizontally(&mut self, width: Pixels, fraction: f64) {
        if !self.scrollable {
            return;
        }
        let offset = -width * fraction;
        self.horizontal_offset = offset;
        self.presenter.on_horizontal_scroll(width, offset);
        self.set_content_width(Some(width + offset));
    }

    /// Vertical counterpart of `scroll_horizontally`.
    pub fn scroll_vertically(&mut self, height: Pixels, fraction: f64) {
        if !self.scrollable {
            return;
        }
        let offset = -height * fraction;
        self.vertical_offset = offset;
        self.presenter.on_vertical_scroll(height, offset);
        self.set_content_height(Some(height + offset));
    }

    /// Returns the cell to a blank state before it goes back to the pool.
    pub fn clear(&mut self) {
        if self.scrollable {
            self.initialize_scrolling();
        }
        self.presenter.on_clear();
        self.item = None;
        self.set_content_width(None);
        self.set_content_height(None);
    }

    fn initialize_scrolling(&mut self) {
        self.horizontal_offset = 0.0;
        self.vertical_offset = 0.0;
        self.set_content_width(None);
        self.set_content_height(None);
    }

    /// Span of this cell along the given axis.
    pub fn span(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.col_span,
            Axis::Vertical => self.row_span,
        }
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("item", &self.item)
            .field("col_span", &self.col_span)
            .field("row_span", &self.row_span)
            .field("content_width", &self.content_width)
            .field("content_height", &self.content_height)
            .field("scrollable", &self.scrollable)
            .field("row", &self.row)
            .field("column", &self.column)
            .finish()
    }
}
