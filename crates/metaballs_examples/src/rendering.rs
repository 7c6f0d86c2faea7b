//! Software rasterization of simulation snapshots into PNG files.
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Rgb, RgbImage};
use metaballs::field::DEFAULT_OUTLINE_RESOLUTION;
use metaballs::prelude::*;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Styling and framing for [`render_simulation_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    /// Pixels kept free around the grid.
    pub margin_px: u32,
    /// Radius of the dot drawn at every sample, 0 to hide samples.
    pub sample_radius_px: i32,
    /// Contour colors, cycled over thresholds.
    pub contour_colors: Vec<[u8; 3]>,
    /// Outline color of the sources, `None` to hide them.
    pub source_color: Option<[u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [20, 20, 24],
            margin_px: 24,
            sample_radius_px: 2,
            contour_colors: vec![[250, 200, 60], [90, 200, 250], [240, 90, 160], [150, 240, 120]],
            source_color: Some([230, 40, 40]),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_sample_radius(mut self, sample_radius_px: i32) -> Self {
        self.sample_radius_px = sample_radius_px;
        self
    }

    pub fn with_contour_colors(mut self, contour_colors: Vec<[u8; 3]>) -> Self {
        self.contour_colors = contour_colors;
        self
    }

    pub fn with_source_color(mut self, source_color: Option<[u8; 3]>) -> Self {
        self.source_color = source_color;
        self
    }
}

/// Maps grid-space meters to pixels, keeping aspect ratio and flipping Y.
struct Viewport {
    scale: f32,
    offset: Vec2,
    height: f32,
}

impl Viewport {
    fn fit(grid: &SampleGrid, config: &RenderConfig) -> Self {
        let (w, h) = config.image_size;
        let margin = config.margin_px as f32;
        let avail = Vec2::new(w as f32 - 2.0 * margin, h as f32 - 2.0 * margin).max(Vec2::ONE);
        let extent = Vec2::new(grid.width(), grid.height());
        let scale = (avail / extent).min_element();
        let offset = Vec2::splat(margin) + (avail - extent * scale) * 0.5;
        Self {
            scale,
            offset,
            height: h as f32,
        }
    }

    fn to_px(&self, p: Vec2) -> (i32, i32) {
        let q = self.offset + p * self.scale;
        (q.x.round() as i32, (self.height - 1.0 - q.y).round() as i32)
    }
}

/// Draws samples, source outlines and every contour mesh of `sim`, then writes a PNG.
pub fn render_simulation_to_png(
    sim: &Simulation,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let img = render_simulation(sim, config);
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Rasterizes `sim` into an in-memory image.
pub fn render_simulation(sim: &Simulation, config: &RenderConfig) -> RgbImage {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let grid = sim.grid();
    let view = Viewport::fit(grid, config);

    if config.sample_radius_px > 0 {
        for (p, sample) in grid.positions() {
            let (x, y) = view.to_px(p);
            fill_disk(&mut img, x, y, config.sample_radius_px, weight_to_rgb8(sample.weight));
        }
    }

    if let Some(color) = config.source_color {
        for source in sim.sources() {
            let outline = source.outline(DEFAULT_OUTLINE_RESOLUTION);
            for (i, a) in outline.iter().enumerate() {
                let b = outline[(i + 1) % outline.len()];
                draw_line(&mut img, view.to_px(*a), view.to_px(b), color);
            }
        }
    }

    if !config.contour_colors.is_empty() {
        for (i, mesh) in sim.meshes().iter().enumerate() {
            let color = config.contour_colors[i % config.contour_colors.len()];
            for (a, b) in mesh.segments() {
                draw_line(&mut img, view.to_px(a), view.to_px(b), color);
            }
        }
    }

    img
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn fill_disk(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: [u8; 3]) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Bresenham line between two pixel positions, inclusive.
fn draw_line(img: &mut RgbImage, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: [u8; 3]) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    loop {
        put(img, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_maps_grid_corners_inside_margin() {
        let grid = SampleGrid::new(Vec2::ZERO, 10, 10, 1.0).unwrap();
        let config = RenderConfig::new((200, 200));
        let view = Viewport::fit(&grid, &config);
        assert_eq!(view.to_px(Vec2::ZERO), (24, 175));
        assert_eq!(view.to_px(Vec2::new(9.0, 9.0)), (176, 23));
    }

    #[test]
    fn draw_line_covers_endpoints() {
        let mut img = RgbImage::new(8, 8);
        draw_line(&mut img, (1, 1), (6, 4), [255, 0, 0]);
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(6, 4).0, [255, 0, 0]);
    }

    #[test]
    fn render_uses_configured_size() {
        let config = SimulationConfig::new(4, 4).with_thresholds([0.5]);
        let source = FieldSource::new(Vec2::new(1.5, 1.5), 1.0, Vec2::X);
        let sim = Simulation::with_sources(config, vec![source]).unwrap();
        let img = render_simulation(&sim, &RenderConfig::new((64, 48)));
        assert_eq!(img.dimensions(), (64, 48));
    }
}
