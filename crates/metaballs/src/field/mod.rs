//! Scalar field subsystem: moving point sources and the sample lattice they are evaluated on.
pub mod color;
pub mod grid;
pub mod source;

pub use color::{weight_to_color, weight_to_rgb8};
pub use grid::{Sample, SampleGrid};
pub use source::{Axis, FieldSource, Reflection, DEFAULT_OUTLINE_RESOLUTION};
