use glam::Vec2;
use metaballs::prelude::*;
use metaballs_examples::{init_tracing, render_simulation_to_png, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 3x3 samples, one unit source on the center sample. Every sample meets the 0.5
    // threshold, so no cell has a crossing.
    let config = SimulationConfig::new(3, 3)
        .with_spacing(1.0)
        .with_thresholds([0.5]);
    let source = FieldSource::new(Vec2::new(1.0, 1.0), 1.0, Vec2::ZERO);
    let sim = Simulation::with_sources(config, vec![source])?;

    for col in 0..3 {
        for row in 0..3 {
            info!(
                "sample ({col}, {row}) weight {:.3}",
                sim.grid().weight_at(col, row)
            );
        }
    }
    info!(
        "threshold 0.5: {} segments",
        sim.meshes()[0].segment_count()
    );

    let rc = RenderConfig::new((256, 256)).with_sample_radius(5);
    render_simulation_to_png(&sim, &rc, "contours-centered-source.png")?;

    Ok(())
}
