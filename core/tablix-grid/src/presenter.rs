//! FILENAME: core/tablix-grid/src/presenter.rs
//! PURPOSE: Collaborator contracts between the engine and the outside world.
//! CONTEXT: The engine never draws anything and never reads rendered output
//! except through these traits. Calls only flow one way: the data-source
//! adapter drives creation calls into the grid, and the grid drives
//! notifications out to presenters and the host. No implementation may call
//! back into the grid's lifecycle methods.

use serde::{Deserialize, Serialize};

use crate::arena::{CellId, RowId};
use crate::axis::{Axis, MoveDirection, Pixels};
use crate::cell::{Cell, TextAlign};

/// The rendering target a visual is laid out for. Hosts pick a presenter
/// implementation from this when a new cell is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    Canvas,
    DashboardTile,
}

impl Default for LayoutKind {
    fn default() -> Self {
        LayoutKind::Canvas
    }
}

/// Measurement and mutation sink for a single cell.
/// Owned exclusively by the `Cell` it presents.
pub trait CellPresenter {
    /// Called once, right after the cell is allocated.
    fn initialize(&mut self, _cell: CellId) {}

    fn on_clear(&mut self);

    fn on_content_width_changed(&mut self, width: Option<Pixels>);

    fn on_content_height_changed(&mut self, height: Option<Pixels>);

    fn on_column_span_changed(&mut self, span: u32);

    fn on_row_span_changed(&mut self, span: u32);

    fn on_text_align_changed(&mut self, align: TextAlign);

    fn on_horizontal_scroll(&mut self, width: Pixels, offset: Pixels);

    fn on_vertical_scroll(&mut self, height: Pixels, offset: Pixels);

    /// Natural width of the rendered content, `None` if it cannot be measured yet.
    fn content_width(&self) -> Option<Pixels>;

    /// Natural height of the rendered content, `None` if it cannot be measured yet.
    fn content_height(&self) -> Option<Pixels>;
}

/// Presenter for a whole row or column.
pub trait AxisPresenter {
    /// Realized pixel size of the row (height) or column (width).
    fn size(&self) -> Pixels;

    fn on_size_changed(&mut self, size: Option<Pixels>);

    fn on_size_cleared(&mut self) {}
}

/// The control hosting the grid, together with the row dimension of the
/// data-source adapter.
pub trait GridHost {
    fn layout_kind(&self) -> LayoutKind;

    fn create_cell_presenter(&mut self, kind: LayoutKind) -> Box<dyn CellPresenter>;

    fn create_axis_presenter(&mut self, axis: Axis) -> Box<dyn AxisPresenter>;

    /// Detaches whatever the adapter bound into `cell`. Called before the
    /// cell is cleared and returned to its row's pool.
    fn unbind_cell(&mut self, cell: &Cell);

    /// Whether the row dimension expects a footer row this iteration.
    fn has_footer(&self) -> bool;

    fn on_row_moved(&mut self, _row: RowId, _direction: MoveDirection) {}

    fn on_cell_moved(&mut self, _cell: CellId, _direction: MoveDirection) {}

    fn on_empty_space_cell_shown(&mut self, _cell: CellId) {}

    fn on_empty_space_cell_hidden(&mut self, _cell: CellId) {}
}
