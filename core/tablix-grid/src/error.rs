//! FILENAME: core/tablix-grid/src/error.rs

use thiserror::Error;

use crate::arena::CellId;
use crate::cell::CellRole;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid grid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Cells with role {0:?} cannot be resized")]
    NotResizable(CellRole),

    #[error("Cell {0:?} is not attached to a row or column")]
    CellDetached(CellId),

    #[error("No resize is in progress")]
    NoActiveResize,

    #[error("A resize is already in progress")]
    ResizeInProgress,

    #[error("Resize target was discarded by a cleared rendering session")]
    StaleTarget,
}

pub type Result<T> = std::result::Result<T, GridError>;
