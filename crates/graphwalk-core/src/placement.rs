use crate::config::CanvasConfig;
use graphwalk_graphlib::Color;
use graphwalk_graphlib::geom::{self, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random positions inside the canvas margin and random vertex colours.
#[derive(Debug, Clone)]
pub struct Placer {
    rng: StdRng,
    canvas: CanvasConfig,
}

impl Placer {
    pub fn new(canvas: CanvasConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, canvas }
    }

    pub fn position(&mut self) -> Point {
        let c = &self.canvas;
        let x = sample(&mut self.rng, c.margin, c.width - c.margin);
        let y = sample(&mut self.rng, c.margin, c.height - c.margin);
        geom::point(x, y)
    }

    pub fn color(&mut self) -> Color {
        Color::from_rgb(self.rng.gen_range(0..=0x00ff_ffff))
    }
}

// Unvalidated canvases can leave an empty range; those collapse onto the margin.
fn sample(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if lo < hi { rng.gen_range(lo..hi) } else { lo }
}
