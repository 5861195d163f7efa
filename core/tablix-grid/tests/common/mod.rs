//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for tablix-grid integration tests.
//!
//! `RecordingHost` stands in for the control and the data-source adapter:
//! its presenters log every notification and answer measurements from a
//! table the test fills in. `TestHarness` drives render passes over a
//! simple matrix layout (one column-header row, one row-header column).

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tablix_grid::{
    Axis, AxisPresenter, Cell, CellId, CellPresenter, ColumnId, GridConfig, GridHost, LayoutKind,
    MoveDirection, Pixels, RowId, TablixGrid, TextAlign,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Note {
    Cleared(CellId),
    Width(CellId, Option<Pixels>),
    Height(CellId, Option<Pixels>),
    ColumnSpan(CellId, u32),
    RowSpan(CellId, u32),
    Align(CellId, TextAlign),
    ScrolledH(CellId, Pixels, Pixels),
    ScrolledV(CellId, Pixels, Pixels),
    AxisSized(Axis, Option<Pixels>),
    RowMoved(RowId, MoveDirection),
    CellMoved(CellId, MoveDirection),
    FillerShown(CellId),
    FillerHidden(CellId),
}

#[derive(Default)]
struct Shared {
    notes: Vec<Note>,
    unbound: Vec<CellId>,
    widths: HashMap<CellId, Pixels>,
    heights: HashMap<CellId, Pixels>,
    default_width: Option<Pixels>,
    default_height: Option<Pixels>,
    axis_size: Pixels,
    footer: bool,
    cells_created: usize,
}

pub struct RecordingHost {
    shared: Rc<RefCell<Shared>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        RecordingHost {
            shared: Rc::new(RefCell::new(Shared::default())),
        }
    }

    pub fn notes(&self) -> Vec<Note> {
        self.shared.borrow().notes.clone()
    }

    pub fn clear_notes(&self) {
        self.shared.borrow_mut().notes.clear();
    }

    pub fn unbound(&self) -> Vec<CellId> {
        self.shared.borrow().unbound.clone()
    }

    pub fn cells_created(&self) -> usize {
        self.shared.borrow().cells_created
    }

    pub fn measure_width(&self, cell: CellId, width: Pixels) {
        self.shared.borrow_mut().widths.insert(cell, width);
    }

    pub fn measure_height(&self, cell: CellId, height: Pixels) {
        self.shared.borrow_mut().heights.insert(cell, height);
    }

    /// Measurement answered for cells without an explicit entry.
    pub fn default_measure(&self, width: Pixels, height: Pixels) {
        let mut shared = self.shared.borrow_mut();
        shared.default_width = Some(width);
        shared.default_height = Some(height);
    }

    pub fn set_axis_size(&self, size: Pixels) {
        self.shared.borrow_mut().axis_size = size;
    }

    pub fn set_footer(&self, footer: bool) {
        self.shared.borrow_mut().footer = footer;
    }

    fn note(&self, note: Note) {
        self.shared.borrow_mut().notes.push(note);
    }
}

struct RecordingCell {
    id: Option<CellId>,
    shared: Rc<RefCell<Shared>>,
}

impl RecordingCell {
    fn note(&self, make: impl FnOnce(CellId) -> Note) {
        if let Some(id) = self.id {
            self.shared.borrow_mut().notes.push(make(id));
        }
    }
}

impl CellPresenter for RecordingCell {
    fn initialize(&mut self, cell: CellId) {
        self.id = Some(cell);
    }

    fn on_clear(&mut self) {
        self.note(Note::Cleared);
    }

    fn on_content_width_changed(&mut self, width: Option<Pixels>) {
        self.note(|id| Note::Width(id, width));
    }

    fn on_content_height_changed(&mut self, height: Option<Pixels>) {
        self.note(|id| Note::Height(id, height));
    }

    fn on_column_span_changed(&mut self, span: u32) {
        self.note(|id| Note::ColumnSpan(id, span));
    }

    fn on_row_span_changed(&mut self, span: u32) {
        self.note(|id| Note::RowSpan(id, span));
    }

    fn on_text_align_changed(&mut self, align: TextAlign) {
        self.note(|id| Note::Align(id, align));
    }

    fn on_horizontal_scroll(&mut self, width: Pixels, offset: Pixels) {
        self.note(|id| Note::ScrolledH(id, width, offset));
    }

    fn on_vertical_scroll(&mut self, height: Pixels, offset: Pixels) {
        self.note(|id| Note::ScrolledV(id, height, offset));
    }

    fn content_width(&self) -> Option<Pixels> {
        let shared = self.shared.borrow();
        self.id
            .and_then(|id| shared.widths.get(&id).copied())
            .or(shared.default_width)
    }

    fn content_height(&self) -> Option<Pixels> {
        let shared = self.shared.borrow();
        self.id
            .and_then(|id| shared.heights.get(&id).copied())
            .or(shared.default_height)
    }
}

struct RecordingAxis {
    axis: Axis,
    shared: Rc<RefCell<Shared>>,
}

impl AxisPresenter for RecordingAxis {
    fn size(&self) -> Pixels {
        self.shared.borrow().axis_size
    }

    fn on_size_changed(&mut self, size: Option<Pixels>) {
        self.shared.borrow_mut().notes.push(Note::AxisSized(self.axis, size));
    }
}

impl GridHost for RecordingHost {
    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Canvas
    }

    fn create_cell_presenter(&mut self, _kind: LayoutKind) -> Box<dyn CellPresenter> {
        self.shared.borrow_mut().cells_created += 1;
        Box::new(RecordingCell {
            id: None,
            shared: Rc::clone(&self.shared),
        })
    }

    fn create_axis_presenter(&mut self, axis: Axis) -> Box<dyn AxisPresenter> {
        Box::new(RecordingAxis {
            axis,
            shared: Rc::clone(&self.shared),
        })
    }

    fn unbind_cell(&mut self, cell: &Cell) {
        self.shared.borrow_mut().unbound.push(cell.id());
    }

    fn has_footer(&self) -> bool {
        self.shared.borrow().footer
    }

    fn on_row_moved(&mut self, row: RowId, direction: MoveDirection) {
        self.note(Note::RowMoved(row, direction));
    }

    fn on_cell_moved(&mut self, cell: CellId, direction: MoveDirection) {
        self.note(Note::CellMoved(cell, direction));
    }

    fn on_empty_space_cell_shown(&mut self, cell: CellId) {
        self.note(Note::FillerShown(cell));
    }

    fn on_empty_space_cell_hidden(&mut self, cell: CellId) {
        self.note(Note::FillerHidden(cell));
    }
}

/// Cells realized by one `render_matrix` pass.
#[derive(Debug, Default)]
pub struct Frame {
    pub rows: Vec<RowId>,
    pub columns: Vec<ColumnId>,
    pub corner: Option<CellId>,
    pub column_headers: Vec<CellId>,
    pub row_headers: Vec<CellId>,
    /// `body[r][c]` for data row `r` and data column `c`.
    pub body: Vec<Vec<CellId>>,
    pub released: usize,
}

/// Test harness owning a grid and a recording host.
pub struct TestHarness {
    pub grid: TablixGrid,
    pub host: RecordingHost,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            grid: TablixGrid::new(),
            host: RecordingHost::new(),
        }
    }

    pub fn with_config(config: GridConfig) -> Self {
        TestHarness {
            grid: TablixGrid::with_config(config).expect("valid config"),
            host: RecordingHost::new(),
        }
    }

    pub fn begin(&mut self, clear: bool) {
        self.grid.on_start_rendering_session(&mut self.host, clear);
        self.grid.on_start_rendering_iteration(&mut self.host);
    }

    pub fn end(&mut self) -> usize {
        self.grid.on_end_rendering_iteration(&mut self.host)
    }

    /// Renders a matrix of `data_rows` x `data_columns` body cells with a
    /// corner cell, one column-header row and one row-header column.
    /// Grid row 0 and grid column 0 hold the headers.
    pub fn render_matrix(&mut self, data_rows: usize, data_columns: usize) -> Frame {
        self.begin(false);
        let mut frame = Frame::default();

        let header_row = self.grid.get_or_create_row(&mut self.host, 0);
        let header_column = self.grid.get_or_create_column(&mut self.host, 0);
        frame.rows.push(header_row);
        frame.columns.push(header_column);
        let corner = self
            .grid
            .get_or_create_corner_cell(&mut self.host, header_row, header_column);
        frame.corner = Some(corner);

        for c in 0..data_columns {
            let column = self.grid.get_or_create_column(&mut self.host, c + 1);
            frame.columns.push(column);
            let header = self
                .grid
                .get_or_create_column_header(&mut self.host, header_row, column, true, true);
            frame.column_headers.push(header);
        }

        for r in 0..data_rows {
            let row = self.grid.get_or_create_row(&mut self.host, r + 1);
            frame.rows.push(row);
            let header = self
                .grid
                .get_or_create_row_header(&mut self.host, row, header_column, false, true);
            frame.row_headers.push(header);
            let cells = (0..data_columns)
                .map(|c| {
                    let column = frame.columns[c + 1];
                    self.grid.get_or_create_body_cell(&mut self.host, row, column, true)
                })
                .collect();
            frame.body.push(cells);
        }

        frame.released = self.end();
        frame
    }
}
