//! Strategies for building the initial pool of field sources.
//!
//! Placement receives the grid extent and an explicit, caller-seeded random generator so
//! that runs are reproducible.
use std::f32::consts::TAU;

use glam::Vec2;
use mint::Vector2;
use rand::Rng;

use crate::error::{Error, Result};
use crate::field::FieldSource;

/// Trait for producing the source pool of a simulation.
pub trait SourcePlacement: Send + Sync {
    fn place(&self, grid_extent: Vector2<f32>, rng: &mut dyn Rng) -> Vec<FieldSource>;

    /// Checks the strategy parameters before placement.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    unit_from_bits(rng.next_u32())
}

/// Maps the top 24 bits of `bits` onto [0, 1), exactly representable in `f32`.
#[inline]
fn unit_from_bits(bits: u32) -> f32 {
    (bits >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// A fixed, caller-provided list of sources.
#[derive(Debug, Clone, Default)]
pub struct FixedPlacement {
    pub sources: Vec<FieldSource>,
}

impl FixedPlacement {
    pub fn new(sources: Vec<FieldSource>) -> Self {
        Self { sources }
    }

    /// Two unit-radius sources, one moving straight up and one diagonally.
    pub fn two_globbers() -> Self {
        Self::new(vec![
            FieldSource::new(Vec2::new(3.0, 3.0), 1.0, Vec2::new(0.0, 1.0)),
            FieldSource::new(Vec2::new(2.0, 1.0), 1.0, Vec2::new(1.0, 1.0)),
        ])
    }
}

impl SourcePlacement for FixedPlacement {
    fn place(&self, _grid_extent: Vector2<f32>, _rng: &mut dyn Rng) -> Vec<FieldSource> {
        self.sources.clone()
    }

    fn validate(&self) -> Result<()> {
        for (i, s) in self.sources.iter().enumerate() {
            if !s.radius.is_finite() || s.radius <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "source {i} radius must be > 0, got {}",
                    s.radius
                )));
            }
            if !s.center.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "source {i} center must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// Uniformly random centers, radii and headings.
#[derive(Debug, Clone)]
pub struct RandomPlacement {
    /// Number of sources to generate.
    pub count: usize,
    /// Smallest radius, inclusive.
    pub radius_min: f32,
    /// Largest radius, exclusive.
    pub radius_max: f32,
}

impl RandomPlacement {
    pub fn new(count: usize, radius_min: f32, radius_max: f32) -> Self {
        Self {
            count,
            radius_min,
            radius_max,
        }
    }
}

impl SourcePlacement for RandomPlacement {
    fn place(&self, grid_extent: Vector2<f32>, rng: &mut dyn Rng) -> Vec<FieldSource> {
        let extent = Vec2::from(grid_extent);
        let mut out = Vec::with_capacity(self.count);

        for _ in 0..self.count {
            let radius = self.radius_min + rand01(rng) * (self.radius_max - self.radius_min);
            // Keep the whole circle inside the grid when it fits, otherwise center it.
            let axis = |len: f32, u: f32| {
                if len > 2.0 * radius {
                    radius + u * (len - 2.0 * radius)
                } else {
                    len * 0.5
                }
            };
            let center = Vec2::new(axis(extent.x, rand01(rng)), axis(extent.y, rand01(rng)));
            let direction = Vec2::from_angle(rand01(rng) * TAU);
            out.push(FieldSource::new(center, radius, direction));
        }

        out
    }

    fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidConfig("source count must be > 0".into()));
        }
        if !self.radius_min.is_finite() || self.radius_min <= 0.0 {
            return Err(Error::InvalidConfig("radius_min must be > 0".into()));
        }
        if !self.radius_max.is_finite() || self.radius_max < self.radius_min {
            return Err(Error::InvalidConfig(
                "radius_max must be finite and >= radius_min".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn two_globbers_are_unit_sources() {
        let p = FixedPlacement::two_globbers();
        let mut rng = StdRng::seed_from_u64(0);
        let sources = p.place(Vec2::new(9.0, 9.0).into(), &mut rng);
        assert_eq!(sources.len(), 2);
        assert!(sources.iter().all(|s| s.radius == 1.0));
        assert!((sources[1].direction.length() - 1.0).abs() < 1e-6);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn fixed_placement_rejects_bad_radius() {
        let p = FixedPlacement::new(vec![FieldSource::new(Vec2::ZERO, 0.0, Vec2::X)]);
        assert!(matches!(p.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn random_placement_respects_bounds() {
        let p = RandomPlacement::new(64, 0.5, 1.5);
        let mut rng = StdRng::seed_from_u64(42);
        let sources = p.place(Vec2::new(9.0, 6.0).into(), &mut rng);
        assert_eq!(sources.len(), 64);
        for s in sources {
            assert!(s.radius >= 0.5 && s.radius < 1.5);
            assert!(s.center.x >= s.radius && s.center.x <= 9.0 - s.radius);
            assert!(s.center.y >= s.radius && s.center.y <= 6.0 - s.radius);
            assert!((s.direction.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn random_placement_is_reproducible() {
        let p = RandomPlacement::new(8, 0.5, 1.0);
        let a = p.place(Vec2::new(9.0, 9.0).into(), &mut StdRng::seed_from_u64(7));
        let b = p.place(Vec2::new(9.0, 9.0).into(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn random_placement_centers_oversized_sources() {
        let p = RandomPlacement::new(4, 3.0, 3.0);
        let mut rng = StdRng::seed_from_u64(3);
        for s in p.place(Vec2::new(4.0, 4.0).into(), &mut rng) {
            assert_eq!(s.center, Vec2::new(2.0, 2.0));
        }
    }

    #[test]
    fn unit_from_bits_stays_below_one() {
        assert_eq!(unit_from_bits(0), 0.0);
        assert!(unit_from_bits(u32::MAX) < 1.0);
        assert_eq!(unit_from_bits(1 << 31), 0.5);
    }

    #[test]
    fn random_placement_validation() {
        assert!(RandomPlacement::new(0, 0.5, 1.0).validate().is_err());
        assert!(RandomPlacement::new(2, 0.0, 1.0).validate().is_err());
        assert!(RandomPlacement::new(2, 1.0, 0.5).validate().is_err());
        assert!(RandomPlacement::new(2, 1.0, 1.0).validate().is_ok());
    }
}
