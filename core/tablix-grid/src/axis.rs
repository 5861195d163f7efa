//! FILENAME: core/tablix-grid/src/axis.rs
//! PURPOSE: The axis-agnostic sizing contract shared by rows and columns.
//! CONTEXT: A row and a column are the same thing with width and height
//! swapped. `AxisItem` is the capability set the grid and the resize handler
//! program against; `AxisSizing` is the state machine both implementations
//! embed.
//!
//! SIZE STATES:
//! - Unfixed: size follows the content, recomputed by `calculate_size`.
//! - Content: frozen from the computed content size plus a correction.
//! - Override: set explicitly by `resize` (drag-resize), survives re-renders.
//! - Aligned: frozen to a size pushed down by a spanning header.
//! `clear_size` returns to Unfixed from any state.

use serde::{Deserialize, Serialize};

use crate::arena::{CellArena, CellId};
use crate::presenter::AxisPresenter;

/// Pixel measure used for every size and offset in the engine.
pub type Pixels = f64;

/// Grid axis. Columns are sized horizontally (width), rows vertically (height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Direction of a structural move, reported to the host so it can move
/// existing nodes instead of recreating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    ToEnd,
    ToStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeState {
    Unfixed,
    Content,
    Override,
    Aligned,
}

impl SizeState {
    pub fn is_fixed(self) -> bool {
        self != SizeState::Unfixed
    }
}

// ============================================================================
// SIZING STATE
// ============================================================================

/// Sizing state of one row or column.
pub struct AxisSizing {
    axis: Axis,
    presenter: Box<dyn AxisPresenter>,
    /// Max content size of the non-spanning cells, from the last calculation.
    content_size: Option<Pixels>,
    /// Size in effect for the current frame; `None` when stale.
    contextual_size: Option<Pixels>,
    /// Pending override from a spanning structure on the cross axis.
    aligning_size: Option<Pixels>,
    state: SizeState,
}

impl AxisSizing {
    pub(crate) fn new(axis: Axis, presenter: Box<dyn AxisPresenter>) -> Self {
        AxisSizing {
            axis,
            presenter,
            content_size: None,
            contextual_size: None,
            aligning_size: None,
            state: SizeState::Unfixed,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn state(&self) -> SizeState {
        self.state
    }

    pub fn content_size(&self) -> Option<Pixels> {
        self.content_size
    }

    pub fn aligning_size(&self) -> Option<Pixels> {
        self.aligning_size
    }

    /// The frozen size, if the item is fixed. Used to seed newly added cells.
    pub fn frozen_size(&self) -> Option<Pixels> {
        if self.state.is_fixed() {
            self.contextual_size
        } else {
            None
        }
    }

    fn measure(&self, cells: &CellArena, id: CellId) -> Option<Pixels> {
        let cell = &cells[id];
        if cell.span(self.axis) != 1 {
            return None;
        }
        match self.axis {
            Axis::Horizontal => cell.measured_content_width(),
            Axis::Vertical => cell.measured_content_height(),
        }
    }

    pub(crate) fn calculate(&mut self, cells: &CellArena, ids: &[CellId]) -> Option<Pixels> {
        if self.state.is_fixed() {
            return self.content_size;
        }
        let max = ids
            .iter()
            .filter_map(|&id| self.measure(cells, id))
            .fold(None, |acc: Option<Pixels>, size| Some(acc.map_or(size, |m| m.max(size))));
        self.content_size = max;
        self.contextual_size = None;
        max
    }

    /// Freezes the size for the frame. Returns the size that was applied, or
    /// `None` when nothing changed.
    pub(crate) fn fix(&mut self, correction: Pixels) -> Option<Option<Pixels>> {
        let applied = match (self.aligning_size, self.state) {
            (_, SizeState::Override) => return None,
            (Some(aligned), SizeState::Aligned) if self.contextual_size == Some(aligned) => {
                return None
            }
            (Some(aligned), _) => {
                self.state = SizeState::Aligned;
                Some(aligned)
            }
            (None, SizeState::Unfixed) | (None, SizeState::Aligned) => {
                self.state = SizeState::Content;
                self.content_size.map(|size| size + correction)
            }
            (None, SizeState::Content) => return None,
        };
        self.contextual_size = applied;
        self.presenter.on_size_changed(applied);
        Some(applied)
    }

    pub(crate) fn resize(&mut self, size: Pixels) {
        self.content_size = Some(size);
        self.contextual_size = Some(size);
        self.aligning_size = None;
        self.state = SizeState::Override;
        self.presenter.on_size_changed(Some(size));
    }

    pub(crate) fn clear(&mut self) {
        self.state = SizeState::Unfixed;
        self.content_size = None;
        self.contextual_size = None;
        self.aligning_size = None;
        self.presenter.on_size_cleared();
    }

    pub(crate) fn set_aligning_size(&mut self, size: Option<Pixels>) {
        self.aligning_size = size;
    }

    /// Size in effect for the frame. Falls back to the presenter's realized
    /// size when nothing is frozen; that answer is only cached once the
    /// content size is known, so an unmeasurable item keeps following its
    /// layout.
    pub(crate) fn contextual(&mut self) -> Pixels {
        if let Some(size) = self.contextual_size {
            return size;
        }
        let size = self.presenter.size();
        let known = self.content_size.is_some()
            || matches!(self.state, SizeState::Aligned | SizeState::Override);
        if known {
            self.contextual_size = Some(size);
        }
        size
    }
}

impl std::fmt::Debug for AxisSizing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisSizing")
            .field("axis", &self.axis)
            .field("state", &self.state)
            .field("content_size", &self.content_size)
            .field("contextual_size", &self.contextual_size)
            .field("aligning_size", &self.aligning_size)
            .finish()
    }
}

fn apply_to_cells(cells: &mut CellArena, axis: Axis, ids: &[CellId], size: Option<Pixels>) {
    for &id in ids {
        let cell = &mut cells[id];
        if cell.span(axis) != 1 {
            continue;
        }
        match axis {
            Axis::Horizontal => cell.set_content_width(size),
            Axis::Vertical => cell.set_content_height(size),
        }
    }
}

// ============================================================================
// AXIS ITEM
// ============================================================================

/// Common interface of `TablixRow` and `TablixColumn`.
pub trait AxisItem {
    fn sizing(&self) -> &AxisSizing;

    fn sizing_mut(&mut self) -> &mut AxisSizing;

    /// Every cell realized on this item this frame, all roles together.
    fn realized_cells(&self) -> Vec<CellId>;

    /// Position of this item in the grid's row or column order.
    fn index(&self) -> usize;

    /// Headers belonging to this item's own axis hierarchy.
    fn headers(&self) -> &[CellId];

    /// Headers of the cross axis that sit on this item.
    fn other_dimension_headers(&self) -> &[CellId];

    /// Scroll offset of the last realized header, zero if there is none.
    fn scrolling_offset(&self, cells: &CellArena) -> Pixels;

    fn axis(&self) -> Axis {
        self.sizing().axis()
    }

    /// Recomputes the content size from the non-spanning cells. No-op while fixed.
    fn calculate_size(&mut self, cells: &CellArena) -> Option<Pixels> {
        let ids = self.realized_cells();
        self.sizing_mut().calculate(cells, &ids)
    }

    /// Freezes the size for the frame and pushes it to the non-spanning cells.
    fn fix_size(&mut self, cells: &mut CellArena, correction: Pixels) {
        let axis = self.axis();
        if let Some(size) = self.sizing_mut().fix(correction) {
            let ids = self.realized_cells();
            apply_to_cells(cells, axis, &ids, size);
        }
    }

    /// Explicit size override; wins over content and alignment until cleared.
    fn resize(&mut self, cells: &mut CellArena, size: Pixels) {
        let axis = self.axis();
        self.sizing_mut().resize(size);
        let ids = self.realized_cells();
        apply_to_cells(cells, axis, &ids, Some(size));
    }

    fn clear_size(&mut self) {
        self.sizing_mut().clear();
    }

    fn set_aligning_size(&mut self, size: Option<Pixels>) {
        self.sizing_mut().set_aligning_size(size);
    }

    fn aligning_size(&self) -> Option<Pixels> {
        self.sizing().aligning_size()
    }

    fn contextual_size(&mut self) -> Pixels {
        self.sizing_mut().contextual()
    }

    fn content_size(&self) -> Option<Pixels> {
        self.sizing().content_size()
    }

    fn size_state(&self) -> SizeState {
        self.sizing().state()
    }

    fn is_size_fixed(&self) -> bool {
        self.size_state().is_fixed()
    }
}
