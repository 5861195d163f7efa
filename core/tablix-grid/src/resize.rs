//! FILENAME: core/tablix-grid/src/resize.rs
//! PURPOSE: Drag-resize of columns and rows from their header cells.
//! CONTEXT: The control forwards pointer gestures on a header edge here. A
//! gesture starts on a cell, reports cumulative deltas while dragging and
//! ends on release; a double-click resets the item to its content size.
//! Column headers and corner cells resize their column, row headers resize
//! their row. Every reported size is clamped to `min_resize_size`.

use log::debug;

use crate::arena::CellId;
use crate::axis::{AxisItem, Pixels};
use crate::cell::CellRole;
use crate::error::{GridError, Result};
use crate::grid::{AxisTarget, TablixGrid};

#[derive(Debug, Clone, Copy)]
struct ActiveResize {
    target: AxisTarget,
    session: u64,
    start_size: Pixels,
    current_size: Pixels,
}

#[derive(Debug, Default)]
pub struct ResizeHandler {
    active: Option<ActiveResize>,
}

impl ResizeHandler {
    pub fn new() -> Self {
        ResizeHandler { active: None }
    }

    pub fn is_resizing(&self) -> bool {
        self.active.is_some()
    }

    /// The row or column being resized, if a gesture is in progress.
    pub fn target(&self) -> Option<AxisTarget> {
        self.active.map(|a| a.target)
    }

    /// The active gesture, provided its target survived every session start
    /// since the gesture began. A stale gesture is dropped.
    fn live(&mut self, grid: &TablixGrid) -> Result<&mut ActiveResize> {
        let session = self.active.ok_or(GridError::NoActiveResize)?.session;
        if session != grid.session() {
            self.active = None;
            debug!(target: "tablix", "resize dropped, target is from session {}", session);
            return Err(GridError::StaleTarget);
        }
        self.active.as_mut().ok_or(GridError::NoActiveResize)
    }

    fn target_of(grid: &TablixGrid, cell: CellId) -> Result<AxisTarget> {
        let c = grid.cells().get(cell).ok_or(GridError::CellDetached(cell))?;
        match c.role() {
            CellRole::ColumnHeader | CellRole::Corner => c
                .column()
                .map(AxisTarget::Column)
                .ok_or(GridError::CellDetached(cell)),
            CellRole::RowHeader => c
                .row()
                .map(AxisTarget::Row)
                .ok_or(GridError::CellDetached(cell)),
            role => Err(GridError::NotResizable(role)),
        }
    }

    /// Begins a gesture on `cell`, remembering the item's current size.
    pub fn on_start_resize(&mut self, grid: &mut TablixGrid, cell: CellId) -> Result<()> {
        if self.active.is_some() {
            return Err(GridError::ResizeInProgress);
        }
        let target = Self::target_of(grid, cell)?;
        let (item, _) = grid.axis_item_mut(target);
        let start_size = item.contextual_size();
        self.active = Some(ActiveResize {
            target,
            session: grid.session(),
            start_size,
            current_size: start_size,
        });
        debug!(target: "tablix", "resize started {:?} at {}", target, start_size);
        Ok(())
    }

    /// Applies `delta` (cumulative since the gesture started) and returns
    /// the clamped size now in effect.
    pub fn on_resize(&mut self, grid: &mut TablixGrid, delta: Pixels) -> Result<Pixels> {
        let min = grid.config().min_resize_size;
        let active = self.live(grid)?;
        let size = (active.start_size + delta).max(min);
        if size != active.current_size {
            let (item, cells) = grid.axis_item_mut(active.target);
            item.resize(cells, size);
            active.current_size = size;
        }
        Ok(size)
    }

    /// Finishes the gesture and returns the final size. The item keeps it
    /// as a manual override until reset.
    pub fn on_end_resize(&mut self, grid: &mut TablixGrid) -> Result<Pixels> {
        let active = *self.live(grid)?;
        self.active = None;
        let (item, cells) = grid.axis_item_mut(active.target);
        item.resize(cells, active.current_size);
        debug!(
            target: "tablix",
            "resize ended {:?} {} -> {}",
            active.target,
            active.start_size,
            active.current_size
        );
        Ok(active.current_size)
    }

    /// Drops a manual size so the item follows its content again.
    pub fn on_reset(&mut self, grid: &mut TablixGrid, cell: CellId) -> Result<()> {
        let target = Self::target_of(grid, cell)?;
        if self.target() == Some(target) {
            self.active = None;
        }
        let (item, _) = grid.axis_item_mut(target);
        item.clear_size();
        debug!(target: "tablix", "resize reset {:?}", target);
        Ok(())
    }
}
