//! FILENAME: core/tablix-grid/src/config.rs
//! Grid Configuration - the tunable knobs of the engine.
//!
//! Everything here is serializable so a visual can persist or ship its grid
//! settings alongside the rest of its options. Missing fields fall back to
//! the defaults, so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};

use crate::axis::Pixels;
use crate::error::{GridError, Result};

// ============================================================================
// POOL CONFIGURATION
// ============================================================================

/// How a row's cell pool grows once every allocated cell is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolGrowth {
    /// Allocate exactly one cell per miss.
    OnDemand,
    /// Allocate this many cells at once per miss.
    Batch(usize),
}

impl Default for PoolGrowth {
    fn default() -> Self {
        PoolGrowth::OnDemand
    }
}

/// Capacity hints and growth policy for the pooled collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Rows reserved up front in the row arena.
    pub initial_rows: usize,

    /// Columns reserved up front in the column arena.
    pub initial_columns: usize,

    /// Capacity reserved in each new row's cell pool.
    pub cells_per_row: usize,

    /// Growth policy when a row's pool is exhausted.
    pub growth: PoolGrowth,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            initial_rows: 0,
            initial_columns: 0,
            cells_per_row: 0,
            growth: PoolGrowth::OnDemand,
        }
    }
}

// ============================================================================
// GRID CONFIGURATION
// ============================================================================

/// Controls sizing behavior and pooling of a `TablixGrid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Added to a locally computed size when it is frozen, so text measured
    /// at a fractional width is not ellipsized by the renderer.
    pub ellipsis_correction: Pixels,

    /// Spread spare horizontal space over columns in proportion to their size.
    pub fill_proportionally: bool,

    /// Smallest size a drag-resize may produce.
    pub min_resize_size: Pixels,

    /// Pool capacity and growth.
    pub pool: PoolConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            ellipsis_correction: 1.0,
            fill_proportionally: false,
            min_resize_size: 10.0,
            pool: PoolConfig::default(),
        }
    }
}

impl GridConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.ellipsis_correction.is_finite() || self.ellipsis_correction < 0.0 {
            return Err(GridError::InvalidConfig {
                field: "ellipsis_correction",
                reason: format!(
                    "must be a finite, non-negative number (got {})",
                    self.ellipsis_correction
                ),
            });
        }
        if !self.min_resize_size.is_finite() || self.min_resize_size <= 0.0 {
            return Err(GridError::InvalidConfig {
                field: "min_resize_size",
                reason: format!("must be a finite, positive number (got {})", self.min_resize_size),
            });
        }
        if self.pool.growth == PoolGrowth::Batch(0) {
            return Err(GridError::InvalidConfig {
                field: "pool.growth",
                reason: "batch size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Number of cells to allocate when a row's pool runs dry.
    pub(crate) fn growth_step(&self) -> usize {
        match self.pool.growth {
            PoolGrowth::OnDemand => 1,
            PoolGrowth::Batch(n) => n.max(1),
        }
    }
}
