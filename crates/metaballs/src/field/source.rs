//! Moving point sources ("globbers") that shape the scalar field.
use std::f32::consts::TAU;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared distance below which a query point is treated as sitting on the source center.
///
/// Contributions are evaluated at this distance instead, so the field stays finite.
pub const MIN_DISTANCE_SQ: f32 = 1.0e-6;

/// Number of points used by the outline mesh of a source.
pub const DEFAULT_OUTLINE_RESOLUTION: usize = 32;

/// Grid axis used when reporting boundary reflections.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// A moving, radius-bearing emitter with inverse-square falloff.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSource {
    /// Center in grid-local meters.
    pub center: Vec2,
    /// Radius in meters. At this distance the contribution is exactly 1.
    pub radius: f32,
    /// Direction of travel, unit length.
    pub direction: Vec2,
}

impl FieldSource {
    /// Creates a source, normalizing `direction`.
    ///
    /// A zero direction yields a stationary source.
    pub fn new(center: Vec2, radius: f32, direction: Vec2) -> Self {
        Self {
            center,
            radius,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Weight contributed at `p`: `radius² / |p - center|²`.
    #[inline]
    pub fn weight_at(&self, p: Vec2) -> f32 {
        let d2 = p.distance_squared(self.center).max(MIN_DISTANCE_SQ);
        (self.radius * self.radius) / d2
    }

    /// Translates the center by `direction * step`.
    #[inline]
    pub fn advance(&mut self, step: f32) {
        self.center += self.direction * step;
    }

    /// Flips direction components for boundaries the source has crossed while moving toward them.
    ///
    /// The grid spans `[0, width] x [0, height]`. Only velocity is changed; the center is
    /// never clamped, so a source may overlap a boundary slightly for a tick.
    /// Returns the axes that were flipped.
    pub fn reflect(&mut self, width: f32, height: f32) -> Reflection {
        let mut reflection = Reflection::default();

        if self.center.x < self.radius && self.direction.x < 0.0 {
            self.direction.x = -self.direction.x;
            reflection.x = true;
        } else if width - self.center.x < self.radius && self.direction.x > 0.0 {
            self.direction.x = -self.direction.x;
            reflection.x = true;
        }

        if self.center.y < self.radius && self.direction.y < 0.0 {
            self.direction.y = -self.direction.y;
            reflection.y = true;
        } else if height - self.center.y < self.radius && self.direction.y > 0.0 {
            self.direction.y = -self.direction.y;
            reflection.y = true;
        }

        reflection
    }

    /// Closed loop of `resolution` points on the source circle, in grid space.
    pub fn outline(&self, resolution: usize) -> Vec<Vec2> {
        let n = resolution.max(3);
        let step = TAU / n as f32;
        (0..n)
            .map(|i| {
                let angle = step * i as f32;
                self.center + Vec2::from_angle(angle) * self.radius
            })
            .collect()
    }
}

/// Axes flipped by a single [`FieldSource::reflect`] call.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

impl Reflection {
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    /// Iterates over the flipped axes, X first.
    pub fn axes(self) -> impl Iterator<Item = Axis> {
        [(self.x, Axis::X), (self.y, Axis::Y)]
            .into_iter()
            .filter_map(|(hit, axis)| hit.then_some(axis))
    }
}
