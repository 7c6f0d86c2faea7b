use metaballs::prelude::*;
use metaballs_examples::{init_tracing, render_simulation_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Several random sources on a wider grid, contoured at four nested isovalues.
    let config = SimulationConfig::new(64, 48)
        .with_spacing(0.5)
        .with_source_step(0.05)
        .with_thresholds([0.5, 1.0, 2.0, 4.0]);
    let placement = RandomPlacement::new(6, 1.0, 3.0);
    let mut rng = StdRng::seed_from_u64(2025);
    let mut sim = Simulation::try_new(config, &placement, &mut rng)?;

    for _ in 0..300 {
        sim.tick()?;
    }

    for mesh in sim.meshes() {
        info!(
            "threshold {:.1}: {} segments",
            mesh.threshold(),
            mesh.segment_count()
        );
    }

    let rc = RenderConfig::new((1024, 768))
        .with_sample_radius(0)
        .with_source_color(Some([200, 60, 60]));
    render_simulation_to_png(&sim, &rc, "contours-random-sources.png")?;

    Ok(())
}
