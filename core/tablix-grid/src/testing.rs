//! FILENAME: core/tablix-grid/src/testing.rs
//! In-crate fakes for unit tests. Only the notifications the unit tests
//! assert on are recorded; the full recording host lives in `tests/common`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::arena::{CellId, RowId};
use crate::axis::{Axis, MoveDirection, Pixels};
use crate::cell::{Cell, TextAlign};
use crate::presenter::{AxisPresenter, CellPresenter, GridHost, LayoutKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Clear(CellId),
    ContentWidth(CellId, Option<Pixels>),
    ColumnSpan(CellId, u32),
    RowSpan(CellId, u32),
    RowMoved(RowId, MoveDirection),
    CellMoved(CellId, MoveDirection),
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    unbound: Vec<CellId>,
    widths: HashMap<CellId, Pixels>,
    heights: HashMap<CellId, Pixels>,
    axis_size: Pixels,
    footer: bool,
}

pub struct FakeHost {
    state: Rc<RefCell<State>>,
}

impl FakeHost {
    pub fn new() -> Self {
        FakeHost {
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn unbound(&self) -> Vec<CellId> {
        self.state.borrow().unbound.clone()
    }

    pub fn set_measured_width(&mut self, cell: CellId, width: Pixels) {
        self.state.borrow_mut().widths.insert(cell, width);
    }

    pub fn set_measured_height(&mut self, cell: CellId, height: Pixels) {
        self.state.borrow_mut().heights.insert(cell, height);
    }

    pub fn set_axis_size(&mut self, size: Pixels) {
        self.state.borrow_mut().axis_size = size;
    }

    pub fn set_footer(&mut self, footer: bool) {
        self.state.borrow_mut().footer = footer;
    }

    fn push(&self, event: Event) {
        self.state.borrow_mut().events.push(event);
    }
}

struct FakeCellPresenter {
    cell: CellId,
    state: Rc<RefCell<State>>,
}

impl FakeCellPresenter {
    fn push(&self, event: Event) {
        self.state.borrow_mut().events.push(event);
    }
}

impl CellPresenter for FakeCellPresenter {
    fn initialize(&mut self, cell: CellId) {
        self.cell = cell;
    }

    fn on_clear(&mut self) {
        self.push(Event::Clear(self.cell));
    }

    fn on_content_width_changed(&mut self, width: Option<Pixels>) {
        self.push(Event::ContentWidth(self.cell, width));
    }

    fn on_content_height_changed(&mut self, _height: Option<Pixels>) {}

    fn on_column_span_changed(&mut self, span: u32) {
        self.push(Event::ColumnSpan(self.cell, span));
    }

    fn on_row_span_changed(&mut self, span: u32) {
        self.push(Event::RowSpan(self.cell, span));
    }

    fn on_text_align_changed(&mut self, _align: TextAlign) {}

    fn on_horizontal_scroll(&mut self, _width: Pixels, _offset: Pixels) {}

    fn on_vertical_scroll(&mut self, _height: Pixels, _offset: Pixels) {}

    fn content_width(&self) -> Option<Pixels> {
        self.state.borrow().widths.get(&self.cell).copied()
    }

    fn content_height(&self) -> Option<Pixels> {
        self.state.borrow().heights.get(&self.cell).copied()
    }
}

struct FakeAxisPresenter {
    state: Rc<RefCell<State>>,
}

impl AxisPresenter for FakeAxisPresenter {
    fn size(&self) -> Pixels {
        self.state.borrow().axis_size
    }

    fn on_size_changed(&mut self, _size: Option<Pixels>) {}
}

impl GridHost for FakeHost {
    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Canvas
    }

    fn create_cell_presenter(&mut self, _kind: LayoutKind) -> Box<dyn CellPresenter> {
        Box::new(FakeCellPresenter {
            cell: CellId(usize::MAX),
            state: Rc::clone(&self.state),
        })
    }

    fn create_axis_presenter(&mut self, _axis: Axis) -> Box<dyn AxisPresenter> {
        Box::new(FakeAxisPresenter {
            state: Rc::clone(&self.state),
        })
    }

    fn unbind_cell(&mut self, cell: &Cell) {
        self.state.borrow_mut().unbound.push(cell.id());
    }

    fn has_footer(&self) -> bool {
        self.state.borrow().footer
    }

    fn on_row_moved(&mut self, row: RowId, direction: MoveDirection) {
        self.push(Event::RowMoved(row, direction));
    }

    fn on_cell_moved(&mut self, cell: CellId, direction: MoveDirection) {
        self.push(Event::CellMoved(cell, direction));
    }
}
