//! Fixed-capacity buffer of contour line segments.
use glam::Vec2;

/// Flat sequence of points, each consecutive pair forming one line segment.
///
/// The capacity is fixed at construction. Segments are disjoint; no connectivity is
/// recorded between them.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourMesh {
    threshold: f32,
    capacity: usize,
    points: Vec<Vec2>,
}

impl ContourMesh {
    /// Creates an empty mesh holding at most `capacity` points.
    pub fn with_capacity(threshold: f32, capacity: usize) -> Self {
        Self {
            threshold,
            capacity,
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Maximum number of points, not segments.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends one segment. Returns `false` without writing when the mesh is full.
    #[inline]
    pub fn try_push_segment(&mut self, a: Vec2, b: Vec2) -> bool {
        if self.points.len() + 2 > self.capacity {
            return false;
        }
        self.points.push(a);
        self.points.push(b);
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_respects_capacity() {
        let mut mesh = ContourMesh::with_capacity(1.0, 4);
        assert!(mesh.try_push_segment(Vec2::ZERO, Vec2::X));
        assert!(mesh.try_push_segment(Vec2::Y, Vec2::ONE));
        assert!(!mesh.try_push_segment(Vec2::ZERO, Vec2::ONE));
        assert_eq!(mesh.len(), 4);
        assert_eq!(mesh.segment_count(), 2);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut mesh = ContourMesh::with_capacity(0.5, 0);
        assert!(!mesh.try_push_segment(Vec2::ZERO, Vec2::X));
        assert!(mesh.is_empty());
    }

    #[test]
    fn segments_pair_consecutive_points() {
        let mut mesh = ContourMesh::with_capacity(1.0, 8);
        mesh.try_push_segment(Vec2::ZERO, Vec2::X);
        mesh.try_push_segment(Vec2::Y, Vec2::ONE);
        let segs: Vec<_> = mesh.segments().collect();
        assert_eq!(segs, vec![(Vec2::ZERO, Vec2::X), (Vec2::Y, Vec2::ONE)]);
        mesh.clear();
        assert_eq!(mesh.segment_count(), 0);
        assert_eq!(mesh.capacity(), 8);
    }
}
