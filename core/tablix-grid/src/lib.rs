//! FILENAME: core/tablix-grid/src/lib.rs
//! Tablix grid virtualization and sizing engine.
//!
//! This crate keeps the retained cell structure behind a scrolling
//! table/matrix visual. Cells are pooled per row and recycled frame to
//! frame; rows and columns freeze their size from the content they hold;
//! structural moves reshuffle pooled objects instead of recreating them.
//! Rendering is delegated to host-provided presenters.
//!
//! Layers:
//! - `arena`: Stable handles and the cell arena
//! - `cell`: One rectangular slot of the grid
//! - `axis`: Sizing state shared by rows and columns
//! - `row` / `column`: Axis items; rows own the cell pool
//! - `grid`: Lifecycle, pool lookup, structural edits, frame sizing
//! - `resize`: Drag-resize of rows and columns
//! - `presenter`: Contracts to the rendering host
//! - `config` / `error`: Tunables and failure modes

pub mod arena;
pub mod axis;
pub mod cell;
pub mod column;
pub mod config;
pub mod error;
pub mod grid;
pub mod presenter;
pub mod resize;
pub mod row;

#[cfg(test)]
mod testing;

pub use arena::{CellArena, CellId, ColumnId, RowId};
pub use axis::{Axis, AxisItem, AxisSizing, MoveDirection, Pixels, SizeState};
pub use cell::{Cell, CellRole, ItemKey, TextAlign};
pub use column::TablixColumn;
pub use config::{GridConfig, PoolConfig, PoolGrowth};
pub use error::{GridError, Result};
pub use grid::{AxisTarget, TablixGrid};
pub use presenter::{AxisPresenter, CellPresenter, GridHost, LayoutKind};
pub use resize::ResizeHandler;
pub use row::TablixRow;
