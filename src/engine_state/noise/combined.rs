use super::Noise;

/// Domain-warped noise.
///
/// `compute(x, y) = base(x + warp(x, y), y)`: the warp source shifts the X input of
/// the base source, breaking up the regular look of plain fractal noise. The
/// generator has no seed of its own.
pub struct CombinedNoise {
    base: Box<dyn Noise>,
    warp: Box<dyn Noise>,
}

impl CombinedNoise {
    /// Combines `base` with the `warp` source that perturbs its input.
    pub fn new(base: Box<dyn Noise>, warp: Box<dyn Noise>) -> Self {
        CombinedNoise { base, warp }
    }
}

impl Noise for CombinedNoise {
    fn compute(&self, x: f64, y: f64) -> f64 {
        self.base.compute(x + self.warp.compute(x, y), y)
    }
}
