//! Marching-squares cell classification, segment lookup and edge interpolation.
//!
//! A [`Cell`] is the square between four adjacent samples. Corners are ordered
//! anticlockwise from the bottom-left, and the active-corner mask uses the same order:
//!
//! ```text
//!  TL(3) --T-- TR(2)
//!    |           |
//!    L           R
//!    |           |
//!  BL(0) --B-- BR(1)
//! ```
//!
//! Edge points are stored in cell-local coordinates, with `(0, 0)` at the bottom-left corner.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::Sample;

/// Cell corner, in mask bit order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Corner {
    BottomLeft = 0,
    BottomRight = 1,
    TopRight = 2,
    TopLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopRight,
        Corner::TopLeft,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Cell edge, indexed Left, Bottom, Right, Top.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Edge {
    Left = 0,
    Bottom = 1,
    Right = 2,
    Top = 3,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Bottom, Edge::Right, Edge::Top];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 4-bit set of corners whose weight meets the threshold.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CornerMask(u8);

impl CornerMask {
    pub const EMPTY: CornerMask = CornerMask(0);
    pub const FULL: CornerMask = CornerMask(0b1111);

    /// Builds a mask from raw bits. Bits above the low four are discarded.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        CornerMask(bits & 0b1111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Sets bit `i` for every corner with `weight >= threshold`.
    pub fn classify(corners: &[Sample; 4], threshold: f32) -> Self {
        let bits = Corner::ALL
            .iter()
            .filter(|c| corners[**c as usize].weight >= threshold)
            .fold(0u8, |acc, c| acc | c.bit());
        CornerMask(bits)
    }

    #[inline]
    pub fn is_active(self, corner: Corner) -> bool {
        self.0 & corner.bit() != 0
    }
}

/// A contour segment between two edge crossings of one cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment(pub Edge, pub Edge);

/// Segments produced by one cell: none, one, or two (saddle cases).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SegmentSet {
    #[default]
    Empty,
    One(Segment),
    Two(Segment, Segment),
}

impl SegmentSet {
    pub fn len(&self) -> usize {
        match self {
            SegmentSet::Empty => 0,
            SegmentSet::One(_) => 1,
            SegmentSet::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SegmentSet::Empty)
    }

    /// Segments in table order.
    pub fn iter(&self) -> impl Iterator<Item = Segment> {
        let (a, b) = match *self {
            SegmentSet::Empty => (None, None),
            SegmentSet::One(a) => (Some(a), None),
            SegmentSet::Two(a, b) => (Some(a), Some(b)),
        };
        a.into_iter().chain(b)
    }

    /// The four edge slots of the lookup row, `None` marking an unused slot.
    pub fn edge_slots(&self) -> [Option<Edge>; 4] {
        match *self {
            SegmentSet::Empty => [None; 4],
            SegmentSet::One(Segment(a, b)) => [Some(a), Some(b), None, None],
            SegmentSet::Two(Segment(a, b), Segment(c, d)) => [Some(a), Some(b), Some(c), Some(d)],
        }
    }

    pub fn contains(&self, edge: Edge) -> bool {
        self.edge_slots().contains(&Some(edge))
    }
}

const fn one(a: Edge, b: Edge) -> SegmentSet {
    SegmentSet::One(Segment(a, b))
}

const fn two(a: Edge, b: Edge, c: Edge, d: Edge) -> SegmentSet {
    SegmentSet::Two(Segment(a, b), Segment(c, d))
}

/// Segment pairing for every corner mask.
///
/// Saddle masks 5 and 10 use a fixed pairing; the cell center is not sampled.
pub const SEGMENT_TABLE: [SegmentSet; 16] = {
    use Edge::{Bottom as B, Left as L, Right as R, Top as T};
    [
        SegmentSet::Empty,
        one(L, B),
        one(B, R),
        one(L, R),
        one(R, T),
        two(L, T, B, R),
        one(B, T),
        one(L, T),
        one(L, T),
        one(B, T),
        two(L, B, R, T),
        one(R, T),
        one(L, R),
        one(B, R),
        one(L, B),
        SegmentSet::Empty,
    ]
};

#[inline]
pub fn lookup(mask: CornerMask) -> SegmentSet {
    SEGMENT_TABLE[mask.bits() as usize]
}

/// Distance from the minor corner where the field crosses `threshold`, along an edge of
/// length `size`.
#[inline]
pub fn lerp(threshold: f32, w_minor: f32, w_major: f32, size: f32) -> f32 {
    size * (threshold - w_minor) / (w_major - w_minor)
}

/// One classified marching-squares cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub corners: [Sample; 4],
    pub mask: CornerMask,
    pub segments: SegmentSet,
    edge_points: [Option<Vec2>; 4],
}

impl Cell {
    /// Classifies `corners` against `threshold` and looks up the segments.
    ///
    /// Edge points are left empty until [`Cell::interpolate`] runs.
    pub fn new(corners: [Sample; 4], threshold: f32) -> Self {
        let mask = CornerMask::classify(&corners, threshold);
        Self {
            corners,
            mask,
            segments: lookup(mask),
            edge_points: [None; 4],
        }
    }

    #[inline]
    fn weight(&self, corner: Corner) -> f32 {
        self.corners[corner as usize].weight
    }

    /// Computes the crossing point of every edge used by the cell's segments.
    ///
    /// The left edge reuses the right edge of `left` and the bottom edge reuses the top
    /// edge of `bottom` when those neighbors have computed them. Right and top edges are
    /// always computed from this cell's corners.
    pub fn interpolate(
        &mut self,
        threshold: f32,
        size: f32,
        bottom: Option<&Cell>,
        left: Option<&Cell>,
    ) {
        use Corner::*;

        self.edge_points = [None; 4];
        for edge in self.segments.edge_slots().into_iter().flatten() {
            if self.edge_points[edge.index()].is_some() {
                continue;
            }
            let point = match edge {
                Edge::Left => {
                    let y = left
                        .and_then(|c| c.edge_point(Edge::Right))
                        .map(|p| p.y)
                        .unwrap_or_else(|| {
                            lerp(threshold, self.weight(BottomLeft), self.weight(TopLeft), size)
                        });
                    Vec2::new(0.0, y)
                }
                Edge::Bottom => {
                    let x = bottom
                        .and_then(|c| c.edge_point(Edge::Top))
                        .map(|p| p.x)
                        .unwrap_or_else(|| {
                            lerp(
                                threshold,
                                self.weight(BottomLeft),
                                self.weight(BottomRight),
                                size,
                            )
                        });
                    Vec2::new(x, 0.0)
                }
                Edge::Right => Vec2::new(
                    size,
                    lerp(threshold, self.weight(BottomRight), self.weight(TopRight), size),
                ),
                Edge::Top => Vec2::new(
                    lerp(threshold, self.weight(TopLeft), self.weight(TopRight), size),
                    size,
                ),
            };
            self.edge_points[edge.index()] = Some(point);
        }
    }

    /// Interpolated crossing on `edge`, in cell-local coordinates.
    #[inline]
    pub fn edge_point(&self, edge: Edge) -> Option<Vec2> {
        self.edge_points[edge.index()]
    }
}
