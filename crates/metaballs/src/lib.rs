#![forbid(unsafe_code)]
//! metaballs: moving point sources over a sample grid with marching-squares isolines.
//!
//! Modules:
//! - field: point sources, the sample lattice, and the sample color ramp
//! - contour: cell classification, segment lookup table, cached sweep, contour meshes
//! - placement: strategies for the initial source pool (fixed, seeded random)
//! - simulation: configuration, tick loop, tick events
//!
//! The crate only produces data. Windowing, pacing and drawing belong to the host, which
//! reads [`simulation::Simulation::meshes`], [`simulation::Simulation::sources`] and
//! [`simulation::Simulation::samples`] after each tick.
pub mod contour;
pub mod error;
pub mod field;
pub mod placement;
pub mod simulation;

/// Convenient re-exports for common types. Import with `use metaballs::prelude::*;`.
pub mod prelude {
    pub use crate::contour::{
        extract, Cell, ContourExtractor, ContourMesh, Corner, CornerMask, Edge, Segment,
        SegmentSet,
    };
    pub use crate::error::{Error, Result};
    pub use crate::field::{
        weight_to_color, weight_to_rgb8, Axis, FieldSource, Sample, SampleGrid,
    };
    pub use crate::placement::{FixedPlacement, RandomPlacement, SourcePlacement};
    pub use crate::simulation::{
        EventSink, FnSink, Simulation, SimulationConfig, TickEvent, VecSink,
    };
}
