use ::noise::{NoiseFn, Perlin};

use super::Noise;

/// Seeded Perlin gradient noise.
///
/// Values lie in `[-1, 1]`; callers remap the range to whatever they need. Like
/// any lattice gradient noise the field is zero at integer coordinates.
#[derive(Clone)]
pub struct PerlinNoise {
    seed: u32,
    perlin: Perlin,
}

impl PerlinNoise {
    /// Creates a generator whose permutation table is derived from `seed`.
    pub fn new(seed: u32) -> Self {
        PerlinNoise {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    /// The seed this generator was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Noise for PerlinNoise {
    fn compute(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y])
    }
}
