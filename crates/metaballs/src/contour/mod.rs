//! Marching-squares contour extraction.
//!
//! This module classifies grid cells against a threshold, pairs edge crossings through a
//! fixed lookup table, and assembles the resulting line segments into [`ContourMesh`]es.
pub mod cell;
pub mod extractor;
pub mod mesh;

pub use cell::{lookup, Cell, Corner, CornerMask, Edge, Segment, SegmentSet, SEGMENT_TABLE};
pub use extractor::{extract, ContourExtractor};
pub use mesh::ContourMesh;
