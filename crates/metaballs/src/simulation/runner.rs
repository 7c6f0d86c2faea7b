//! Tick loop that moves sources, refreshes the field and rebuilds every contour mesh.
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::contour::{ContourExtractor, ContourMesh};
use crate::error::{Error, Result};
use crate::field::{FieldSource, Sample, SampleGrid};
use crate::placement::SourcePlacement;
use crate::simulation::config::SimulationConfig;
use crate::simulation::events::{EventSink, TickEvent};

/// Owns the grid, the source pool and one contour mesh per threshold.
///
/// Ticking is synchronous and deterministic for a given initial source pool. Callers are
/// expected to drive [`Simulation::tick`] at a fixed rate.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    grid: SampleGrid,
    sources: Vec<FieldSource>,
    meshes: Vec<ContourMesh>,
    extractor: ContourExtractor,
    tick: u64,
}

impl Simulation {
    /// Validates `config`, places the sources and computes the initial field and meshes.
    pub fn try_new(
        config: SimulationConfig,
        placement: &dyn SourcePlacement,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        config.validate()?;
        placement.validate()?;
        let sources = placement.place(config.grid_extent().into(), rng);
        Self::with_sources(config, sources)
    }

    /// Builds a simulation around an explicit source pool.
    ///
    /// A mesh capacity too small for the initial field is reported as
    /// [`Error::InvalidConfig`].
    pub fn with_sources(config: SimulationConfig, sources: Vec<FieldSource>) -> Result<Self> {
        config.validate()?;
        validate_sources(&config, &sources)?;

        let grid = SampleGrid::new(config.grid_origin, config.cols, config.rows, config.spacing)?;
        let capacity = config.effective_mesh_capacity();
        let worst_case = config.worst_case_mesh_capacity();
        if capacity < worst_case {
            warn!(
                "Mesh capacity {} is below the worst case of {} points for a {}x{} grid.",
                capacity, worst_case, config.cols, config.rows
            );
        }

        let meshes = config
            .thresholds
            .iter()
            .map(|&t| ContourMesh::with_capacity(t, capacity))
            .collect();
        let extractor = ContourExtractor::for_grid(&grid);

        info!(
            "Simulation created: {}x{} samples, spacing {}, {} sources, thresholds {:?}.",
            config.cols,
            config.rows,
            config.spacing,
            sources.len(),
            config.thresholds
        );

        let mut sim = Self {
            config,
            grid,
            sources,
            meshes,
            extractor,
            tick: 0,
        };
        sim.refresh(&mut ()).map_err(|err| match err {
            Error::CapacityExceeded {
                threshold,
                required,
                capacity,
            } => Error::InvalidConfig(format!(
                "mesh_capacity {capacity} is too small: threshold {threshold} needs {required} points"
            )),
            other => other,
        })?;
        Ok(sim)
    }

    /// Advances the simulation by one fixed step.
    pub fn tick(&mut self) -> Result<()> {
        self.tick_with_events(&mut ())
    }

    /// Same as [`Simulation::tick`], reporting progress to `sink`.
    ///
    /// A [`Error::CapacityExceeded`] aborts the tick. The offending mesh is left empty
    /// and meshes of later thresholds keep their previous contents.
    pub fn tick_with_events(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        sink.send(TickEvent::TickStarted { tick: self.tick });

        let (width, height) = (self.grid.width(), self.grid.height());
        let step = self.config.source_step;
        for (source_index, source) in self.sources.iter_mut().enumerate() {
            source.advance(step);
            for axis in source.reflect(width, height).axes() {
                sink.send(TickEvent::SourceReflected { source_index, axis });
            }
        }

        let total_segments = self.refresh(sink)?;
        debug!(
            "Tick {} finished: {} segments over {} thresholds.",
            self.tick,
            total_segments,
            self.meshes.len()
        );
        sink.send(TickEvent::TickFinished {
            tick: self.tick,
            total_segments,
        });
        self.tick += 1;
        Ok(())
    }

    /// Recomputes the field and regenerates every mesh, returning the total segment count.
    fn refresh(&mut self, sink: &mut dyn EventSink) -> Result<usize> {
        self.grid.recompute(&self.sources);

        let mut total_segments = 0;
        for (threshold_index, mesh) in self.meshes.iter_mut().enumerate() {
            if let Err(err) = self.extractor.extract_into(&self.grid, mesh) {
                if let Error::CapacityExceeded {
                    threshold,
                    required,
                    capacity,
                } = &err
                {
                    error!(
                        "Contour mesh {} (threshold {}) needs {} points, capacity is {}.",
                        threshold_index, threshold, required, capacity
                    );
                }
                return Err(err);
            }
            total_segments += mesh.segment_count();
            sink.send(TickEvent::MeshExtracted {
                threshold_index,
                threshold: mesh.threshold(),
                segment_count: mesh.segment_count(),
            });
        }
        Ok(total_segments)
    }

    /// Contour meshes in threshold order, in grid space.
    pub fn meshes(&self) -> &[ContourMesh] {
        &self.meshes
    }

    pub fn sources(&self) -> &[FieldSource] {
        &self.sources
    }

    /// Grid samples in column-major order.
    pub fn samples(&self) -> &[Sample] {
        self.grid.samples()
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.config.thresholds
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

fn validate_sources(config: &SimulationConfig, sources: &[FieldSource]) -> Result<()> {
    if sources.is_empty() {
        return Err(Error::InvalidConfig(
            "at least one field source is required".into(),
        ));
    }
    let extent = config.grid_extent();
    let max_radius = extent.min_element() * 0.5;
    for (i, s) in sources.iter().enumerate() {
        if !s.radius.is_finite() || s.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "source {i} radius must be > 0, got {}",
                s.radius
            )));
        }
        if s.radius > max_radius {
            return Err(Error::InvalidConfig(format!(
                "source {i} radius {} does not fit a {}x{} grid",
                s.radius, extent.x, extent.y
            )));
        }
        if !s.center.is_finite() || !s.direction.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "source {i} position and direction must be finite"
            )));
        }
    }
    Ok(())
}
