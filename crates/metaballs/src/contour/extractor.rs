//! Single-threshold contour sweep over a [`SampleGrid`].
//!
//! Cells are visited column by column, rows ascending within a column. Two column-wide
//! caches hold the cells of the current and previous column, so each cell can reuse the
//! right edge of its left neighbor and the top edge of its bottom neighbor. The caches
//! swap roles at the end of every column.
use glam::Vec2;

use crate::contour::cell::Cell;
use crate::contour::mesh::ContourMesh;
use crate::error::{Error, Result};
use crate::field::{Sample, SampleGrid};

/// One column of classified cells.
#[derive(Clone, Debug, Default)]
struct CellCache {
    cells: Vec<Cell>,
}

impl CellCache {
    fn resize(&mut self, len: usize) {
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }
}

/// Reusable marching-squares extractor.
///
/// Holds the column caches between calls so repeated extraction on the same grid does
/// not allocate.
#[derive(Clone, Debug, Default)]
pub struct ContourExtractor {
    current: CellCache,
    previous: CellCache,
}

impl ContourExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with caches sized for `grid`.
    pub fn for_grid(grid: &SampleGrid) -> Self {
        let mut extractor = Self::default();
        extractor.prepare(grid.rows() - 1);
        extractor
    }

    fn prepare(&mut self, cell_rows: usize) {
        if self.current.cells.len() != cell_rows {
            self.current.resize(cell_rows);
            self.previous.resize(cell_rows);
        }
    }

    /// Extracts the isoline at `threshold` into a new mesh of `capacity` points.
    pub fn extract(
        &mut self,
        grid: &SampleGrid,
        threshold: f32,
        capacity: usize,
    ) -> Result<ContourMesh> {
        let mut mesh = ContourMesh::with_capacity(threshold, capacity);
        self.extract_into(grid, &mut mesh)?;
        Ok(mesh)
    }

    /// Replaces the contents of `mesh` with the isoline at `mesh.threshold()`.
    ///
    /// Points are in grid space. When the mesh capacity is too small, the sweep still runs
    /// to completion to count the required points, the mesh is left empty, and
    /// [`Error::CapacityExceeded`] is returned.
    pub fn extract_into(&mut self, grid: &SampleGrid, mesh: &mut ContourMesh) -> Result<()> {
        let threshold = mesh.threshold();
        let size = grid.spacing();
        let (cell_cols, cell_rows) = (grid.cols() - 1, grid.rows() - 1);

        self.prepare(cell_rows);
        mesh.clear();

        let mut required = 0usize;
        let mut overflowed = false;

        for col in 0..cell_cols {
            for row in 0..cell_rows {
                let corners = [
                    Sample {
                        weight: grid.weight_at(col, row),
                    },
                    Sample {
                        weight: grid.weight_at(col + 1, row),
                    },
                    Sample {
                        weight: grid.weight_at(col + 1, row + 1),
                    },
                    Sample {
                        weight: grid.weight_at(col, row + 1),
                    },
                ];
                let mut cell = Cell::new(corners, threshold);

                let left = (col > 0).then(|| &self.previous.cells[row]);
                let bottom = (row > 0).then(|| &self.current.cells[row - 1]);
                cell.interpolate(threshold, size, bottom, left);

                let offset = Vec2::new(col as f32 * size, row as f32 * size);
                for segment in cell.segments.iter() {
                    let (Some(a), Some(b)) = (cell.edge_point(segment.0), cell.edge_point(segment.1))
                    else {
                        unreachable!("segment edge without interpolated point");
                    };
                    required += 2;
                    if !overflowed && !mesh.try_push_segment(a + offset, b + offset) {
                        overflowed = true;
                    }
                }

                self.current.cells[row] = cell;
            }
            std::mem::swap(&mut self.current, &mut self.previous);
        }

        debug_assert!(required % 2 == 0, "odd contour point count");

        if overflowed {
            mesh.clear();
            return Err(Error::CapacityExceeded {
                threshold,
                required,
                capacity: mesh.capacity(),
            });
        }
        Ok(())
    }
}

/// Extracts one isoline with a temporary extractor.
pub fn extract(grid: &SampleGrid, threshold: f32, capacity: usize) -> Result<ContourMesh> {
    ContourExtractor::for_grid(grid).extract(grid, threshold, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::cell::Edge;
    use crate::field::FieldSource;

    fn grid_with(cols: usize, rows: usize, spacing: f32, sources: &[FieldSource]) -> SampleGrid {
        let mut grid = SampleGrid::new(Vec2::ZERO, cols, rows, spacing).unwrap();
        grid.recompute(sources);
        grid
    }

    fn worst_case(grid: &SampleGrid) -> usize {
        grid.cell_count() * 4
    }

    /// Reference sweep where every cell interpolates all of its edges itself.
    fn extract_without_reuse(grid: &SampleGrid, threshold: f32) -> Vec<Vec2> {
        let size = grid.spacing();
        let mut out = Vec::new();
        for col in 0..grid.cols() - 1 {
            for row in 0..grid.rows() - 1 {
                let corners = [
                    (col, row),
                    (col + 1, row),
                    (col + 1, row + 1),
                    (col, row + 1),
                ]
                .map(|(c, r)| Sample {
                    weight: grid.weight_at(c, r),
                });
                let mut cell = Cell::new(corners, threshold);
                cell.interpolate(threshold, size, None, None);
                let offset = Vec2::new(col as f32 * size, row as f32 * size);
                for s in cell.segments.iter() {
                    out.push(cell.edge_point(s.0).unwrap() + offset);
                    out.push(cell.edge_point(s.1).unwrap() + offset);
                }
            }
        }
        out
    }

    #[test]
    fn centered_source_on_tiny_grid_yields_empty_mesh() {
        let source = FieldSource::new(Vec2::new(1.0, 1.0), 1.0, Vec2::X);
        let grid = grid_with(3, 3, 1.0, &[source]);

        assert!((grid.weight_at(0, 0) - 0.5).abs() < 1e-6);
        assert!((grid.weight_at(2, 2) - 0.5).abs() < 1e-6);
        assert!(grid.weight_at(1, 1) >= 1.0);

        let mesh = extract(&grid, 0.5, worst_case(&grid)).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn cached_sweep_matches_uncached_reference() {
        let sources = [
            FieldSource::new(Vec2::new(3.1, 2.7), 1.2, Vec2::X),
            FieldSource::new(Vec2::new(6.4, 6.9), 0.8, Vec2::Y),
        ];
        let grid = grid_with(10, 10, 1.0, &sources);
        let mut extractor = ContourExtractor::for_grid(&grid);

        for threshold in [0.3, 0.5, 1.0, 2.0] {
            let mesh = extractor
                .extract(&grid, threshold, worst_case(&grid))
                .unwrap();
            let reference = extract_without_reuse(&grid, threshold);
            assert_eq!(mesh.len(), reference.len());
            for (a, b) in mesh.points().iter().zip(&reference) {
                assert!((*a - *b).length() < 1e-5, "{a} vs {b} at {threshold}");
            }
        }
    }

    #[test]
    fn shared_edges_agree_between_neighbors() {
        let sources = [FieldSource::new(Vec2::new(2.2, 2.6), 1.3, Vec2::X)];
        let grid = grid_with(6, 6, 0.5, &sources);
        let threshold = 0.9;
        let size = grid.spacing();

        let cell_at = |col: usize, row: usize| {
            let corners = [
                (col, row),
                (col + 1, row),
                (col + 1, row + 1),
                (col, row + 1),
            ]
            .map(|(c, r)| Sample {
                weight: grid.weight_at(c, r),
            });
            let mut cell = Cell::new(corners, threshold);
            cell.interpolate(threshold, size, None, None);
            cell
        };

        for col in 0..4 {
            for row in 0..5 {
                let a = cell_at(col, row);
                let b = cell_at(col + 1, row);
                match (a.edge_point(Edge::Right), b.edge_point(Edge::Left)) {
                    (Some(r), Some(l)) => assert!((r.y - l.y).abs() < 1e-6),
                    (None, None) => {}
                    other => panic!("edge presence mismatch at ({col}, {row}): {other:?}"),
                }
            }
        }
        for col in 0..5 {
            for row in 0..4 {
                let a = cell_at(col, row);
                let b = cell_at(col, row + 1);
                match (a.edge_point(Edge::Top), b.edge_point(Edge::Bottom)) {
                    (Some(t), Some(bt)) => assert!((t.x - bt.x).abs() < 1e-6),
                    (None, None) => {}
                    other => panic!("edge presence mismatch at ({col}, {row}): {other:?}"),
                }
            }
        }
    }

    #[test]
    fn points_stay_inside_their_cell() {
        let sources = [FieldSource::new(Vec2::new(4.5, 4.5), 1.5, Vec2::X)];
        let grid = grid_with(10, 10, 1.0, &sources);
        let mesh = extract(&grid, 1.0, worst_case(&grid)).unwrap();
        assert!(!mesh.is_empty());
        for (a, b) in mesh.segments() {
            let cell_a = (a / grid.spacing()).floor();
            let cell_b = (b / grid.spacing()).floor();
            // Both ends of a segment lie in the closed square of the same cell.
            assert!((cell_a - cell_b).abs().max_element() <= 1.0);
            assert!(a.x >= 0.0 && a.x <= grid.width());
            assert!(a.y >= 0.0 && a.y <= grid.height());
        }
    }

    #[test]
    fn zero_capacity_reports_capacity_exceeded() {
        let sources = [FieldSource::new(Vec2::new(4.5, 4.5), 1.5, Vec2::X)];
        let grid = grid_with(10, 10, 1.0, &sources);
        let expected = extract_without_reuse(&grid, 1.0).len();
        assert!(expected > 0);

        let err = extract(&grid, 1.0, 0).unwrap_err();
        match err {
            Error::CapacityExceeded {
                threshold,
                required,
                capacity,
            } => {
                assert_eq!(threshold, 1.0);
                assert_eq!(required, expected);
                assert_eq!(capacity, 0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn overflow_leaves_mesh_empty() {
        let sources = [FieldSource::new(Vec2::new(4.5, 4.5), 1.5, Vec2::X)];
        let grid = grid_with(10, 10, 1.0, &sources);
        let mut mesh = ContourMesh::with_capacity(1.0, 2);
        let mut extractor = ContourExtractor::new();
        assert!(extractor.extract_into(&grid, &mut mesh).is_err());
        assert!(mesh.is_empty());
    }

    #[test]
    fn extractor_adapts_to_grid_height() {
        let source = [FieldSource::new(Vec2::new(2.0, 2.0), 1.0, Vec2::X)];
        let small = grid_with(5, 5, 1.0, &source);
        let tall = grid_with(5, 9, 1.0, &source);
        let mut extractor = ContourExtractor::for_grid(&small);
        let a = extractor.extract(&small, 0.5, worst_case(&small)).unwrap();
        let b = extractor.extract(&tall, 0.5, worst_case(&tall)).unwrap();
        assert_eq!(a.len(), extract_without_reuse(&small, 0.5).len());
        assert_eq!(b.len(), extract_without_reuse(&tall, 0.5).len());
    }
}
