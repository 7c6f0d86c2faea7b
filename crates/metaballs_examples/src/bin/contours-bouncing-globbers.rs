use metaballs::prelude::*;
use metaballs_examples::{init_tracing, render_simulation_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const TICKS: u64 = 600;
const FRAME_EVERY: u64 = 100;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Two unit globbers drifting over a 10x10 grid, contoured at weight 1.
    let config = SimulationConfig::default().with_thresholds([1.0]);
    let mut rng = StdRng::seed_from_u64(0);
    let mut sim = Simulation::try_new(config, &FixedPlacement::two_globbers(), &mut rng)?;

    let rc = RenderConfig::new((512, 512)).with_sample_radius(3);
    let mut reflections = 0usize;

    for _ in 0..TICKS {
        let mut sink = FnSink::new(|event| {
            if let TickEvent::SourceReflected { .. } = event {
                reflections += 1;
            }
        });
        sim.tick_with_events(&mut sink)?;

        if sim.tick_count() % FRAME_EVERY == 0 {
            let out = format!("contours-bouncing-globbers-{:04}.png", sim.tick_count());
            render_simulation_to_png(&sim, &rc, &out)?;
        }
    }

    info!(
        "{} ticks, {} boundary reflections, {} segments in final mesh",
        sim.tick_count(),
        reflections,
        sim.meshes()[0].segment_count()
    );

    Ok(())
}
