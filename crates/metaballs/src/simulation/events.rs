//! Event types and sinks for observing simulation ticks.
//!
//! [`crate::simulation::Simulation::tick_with_events`] reports what happened during a tick
//! through an [`EventSink`]. [`crate::simulation::Simulation::tick`] uses the no-op sink.
use crate::field::Axis;

/// Describes events emitted while ticking a simulation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Emitted before any source moves.
    TickStarted {
        /// Index of the tick being run, starting at 0.
        tick: u64,
    },

    /// Emitted when a source bounced off a grid boundary.
    SourceReflected {
        /// Index of the source in the pool.
        source_index: usize,
        /// Axis whose direction component was negated.
        axis: Axis,
    },

    /// Emitted after the mesh of one threshold was regenerated.
    MeshExtracted {
        /// Position of the threshold in the configured set.
        threshold_index: usize,
        /// The isovalue.
        threshold: f32,
        /// Number of line segments produced.
        segment_count: usize,
    },

    /// Emitted after every mesh was regenerated.
    TickFinished {
        /// Index of the completed tick.
        tick: u64,
        /// Total segments over all thresholds.
        total_segments: usize,
    },
}

/// A generic event sink that accepts [`TickEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: TickEvent);
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: TickEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(TickEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(TickEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(TickEvent),
{
    #[inline]
    fn send(&mut self, event: TickEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<TickEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<TickEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[TickEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: TickEvent) {
        self.events.push(event);
    }
}
