//! Fixed lattice of scalar samples.
//!
//! [`SampleGrid`] owns the sample weights and the grid-to-world transform. Sample positions
//! are derived from `(col, row)` and the spacing, never stored. Storage is column-major,
//! matching the `[col][row]` access pattern of the contour sweep.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::source::FieldSource;

/// One scalar field value at a lattice position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub weight: f32,
}

/// A `cols x rows` lattice of samples with regular spacing.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    /// World-space position of sample `(0, 0)`.
    pub origin: Vec2,
    spacing: f32,
    cols: usize,
    rows: usize,
    samples: Vec<Sample>,
}

impl SampleGrid {
    /// Creates a zeroed grid.
    ///
    /// Fails when either dimension is below 2 or the spacing is not a positive finite value.
    pub fn new(origin: Vec2, cols: usize, rows: usize, spacing: f32) -> Result<Self> {
        if cols < 2 || rows < 2 {
            return Err(Error::InvalidConfig(format!(
                "grid must have at least 2x2 samples, got {cols}x{rows}"
            )));
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "grid spacing must be > 0, got {spacing}"
            )));
        }
        Ok(Self {
            origin,
            spacing,
            cols,
            rows,
            samples: vec![Sample::default(); cols * rows],
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Distance between adjacent samples, which is also the cell size.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Grid width in meters.
    pub fn width(&self) -> f32 {
        (self.cols - 1) as f32 * self.spacing
    }

    /// Grid height in meters.
    pub fn height(&self) -> f32 {
        (self.rows - 1) as f32 * self.spacing
    }

    /// Number of cells, `(cols - 1) * (rows - 1)`.
    pub fn cell_count(&self) -> usize {
        (self.cols - 1) * (self.rows - 1)
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.cols && row < self.rows,
            "sample ({col}, {row}) outside {}x{} grid",
            self.cols,
            self.rows
        );
        col * self.rows + row
    }

    /// Grid-space position of a sample. Panics when out of range.
    #[inline]
    pub fn position_of(&self, col: usize, row: usize) -> Vec2 {
        assert!(col < self.cols && row < self.rows);
        Vec2::new(col as f32 * self.spacing, row as f32 * self.spacing)
    }

    /// Weight of a sample. Panics when out of range.
    #[inline]
    pub fn weight_at(&self, col: usize, row: usize) -> f32 {
        self.samples[self.index(col, row)].weight
    }

    /// Checked variant of [`SampleGrid::position_of`].
    pub fn try_position_of(&self, col: usize, row: usize) -> Result<Vec2> {
        self.check_bounds(col, row)?;
        Ok(self.position_of(col, row))
    }

    /// Checked variant of [`SampleGrid::weight_at`].
    pub fn try_weight_at(&self, col: usize, row: usize) -> Result<f32> {
        self.check_bounds(col, row)?;
        Ok(self.weight_at(col, row))
    }

    fn check_bounds(&self, col: usize, row: usize) -> Result<()> {
        if col >= self.cols || row >= self.rows {
            return Err(Error::IndexOutOfRange {
                col,
                row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Re-evaluates every sample as the sum of all source contributions.
    pub fn recompute(&mut self, sources: &[FieldSource]) {
        let (rows, spacing) = (self.rows, self.spacing);
        for (i, sample) in self.samples.iter_mut().enumerate() {
            let p = Vec2::new((i / rows) as f32 * spacing, (i % rows) as f32 * spacing);
            sample.weight = sources.iter().map(|s| s.weight_at(p)).sum();
        }
    }

    /// All samples in column-major order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Grid-space positions paired with their samples, column-major.
    pub fn positions(&self) -> impl Iterator<Item = (Vec2, Sample)> + '_ {
        self.samples.iter().enumerate().map(move |(i, s)| {
            let p = Vec2::new(
                (i / self.rows) as f32 * self.spacing,
                (i % self.rows) as f32 * self.spacing,
            );
            (p, *s)
        })
    }

    /// Converts a grid-space point to world space.
    #[inline]
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        self.origin + p
    }
}
