//! Simulation configuration.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-tick distance travelled by every source, in meters.
pub const DEFAULT_SOURCE_STEP: f32 = 0.01;

/// Points written per cell in the worst case (a saddle cell emits two segments).
pub const MAX_POINTS_PER_CELL: usize = 4;

/// Configuration for a [`crate::simulation::Simulation`].
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// World-space position of the grid origin.
    pub grid_origin: Vec2,
    /// Number of sample columns.
    pub cols: usize,
    /// Number of sample rows.
    pub rows: usize,
    /// Distance between samples in meters.
    pub spacing: f32,
    /// Distance each source moves per tick.
    pub source_step: f32,
    /// Isovalues, one contour mesh each, in draw order.
    pub thresholds: Vec<f32>,
    /// Points each mesh may hold. `None` sizes meshes for the worst case.
    pub mesh_capacity: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_origin: Vec2::ZERO,
            cols: 10,
            rows: 10,
            spacing: 1.0,
            source_step: DEFAULT_SOURCE_STEP,
            thresholds: vec![1.0],
            mesh_capacity: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a new [`SimulationConfig`] with the given sample counts.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Sets the grid origin in world coordinates.
    pub fn with_grid_origin(mut self, grid_origin: Vec2) -> Self {
        self.grid_origin = grid_origin;
        self
    }

    /// Sets the sample spacing.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the per-tick source step.
    pub fn with_source_step(mut self, source_step: f32) -> Self {
        self.source_step = source_step;
        self
    }

    /// Sets the isovalue thresholds.
    pub fn with_thresholds(mut self, thresholds: impl Into<Vec<f32>>) -> Self {
        self.thresholds = thresholds.into();
        self
    }

    /// Sets a fixed mesh capacity in points.
    pub fn with_mesh_capacity(mut self, mesh_capacity: usize) -> Self {
        self.mesh_capacity = Some(mesh_capacity);
        self
    }

    /// Number of cells, or 0 for a degenerate grid.
    pub fn cell_count(&self) -> usize {
        self.cols.saturating_sub(1) * self.rows.saturating_sub(1)
    }

    /// Point capacity that no field can exceed on this grid.
    pub fn worst_case_mesh_capacity(&self) -> usize {
        self.cell_count() * MAX_POINTS_PER_CELL
    }

    /// Capacity actually used for each mesh.
    pub fn effective_mesh_capacity(&self) -> usize {
        self.mesh_capacity
            .unwrap_or_else(|| self.worst_case_mesh_capacity())
    }

    /// Grid extent in meters.
    pub fn grid_extent(&self) -> Vec2 {
        Vec2::new(
            self.cols.saturating_sub(1) as f32 * self.spacing,
            self.rows.saturating_sub(1) as f32 * self.spacing,
        )
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.cols < 2 || self.rows < 2 {
            return Err(Error::InvalidConfig(format!(
                "grid must have at least 2x2 samples, got {}x{}",
                self.cols, self.rows
            )));
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(Error::InvalidConfig("spacing must be > 0".into()));
        }
        if !self.source_step.is_finite() || self.source_step < 0.0 {
            return Err(Error::InvalidConfig("source_step must be >= 0".into()));
        }
        if !self.grid_origin.is_finite() {
            return Err(Error::InvalidConfig("grid_origin must be finite".into()));
        }
        if self.thresholds.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one threshold is required".into(),
            ));
        }
        if let Some(t) = self.thresholds.iter().find(|t| !t.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "thresholds must be finite, got {t}"
            )));
        }
        let capacity = self.effective_mesh_capacity();
        if capacity == 0 || capacity % 2 != 0 {
            return Err(Error::InvalidConfig(format!(
                "mesh_capacity must be a positive even point count, got {capacity}"
            )));
        }

        Ok(())
    }
}
