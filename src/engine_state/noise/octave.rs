use fastrand::Rng;

use super::{perlin::PerlinNoise, Noise};

/// Fractal sum of Perlin fields.
///
/// Octave `i` samples its own Perlin generator at `2^i` times the input frequency
/// and contributes with weight `1 / 2^i`. The sum is remapped with `(v + 1) / 2`,
/// which puts typical values in `[0, 1]`.
#[derive(Clone)]
pub struct OctaveNoise {
    octaves: Vec<PerlinNoise>,
}

impl OctaveNoise {
    /// Creates `octaves` independently seeded layers, drawing their seeds from `rng`.
    pub fn new(octaves: usize, rng: &mut Rng) -> Self {
        let seeds: Vec<u32> = (0..octaves).map(|_| rng.u32(..)).collect();
        Self::from_seeds(&seeds)
    }

    /// Creates one layer per seed, lowest frequency first.
    pub fn from_seeds(seeds: &[u32]) -> Self {
        OctaveNoise {
            octaves: seeds.iter().map(|&seed| PerlinNoise::new(seed)).collect(),
        }
    }

    /// Number of layers.
    pub fn octaves(&self) -> usize {
        self.octaves.len()
    }

    /// Seeds of the layers, lowest frequency first.
    pub fn seeds(&self) -> Vec<u32> {
        self.octaves.iter().map(PerlinNoise::seed).collect()
    }
}

impl Noise for OctaveNoise {
    fn compute(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0;
        let mut frequency = 1.0;
        for perlin in &self.octaves {
            value += perlin.compute(x * frequency, y * frequency) / frequency;
            frequency *= 2.0;
        }
        (value + 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_octave_is_a_normalized_perlin_sample() {
        let octave = OctaveNoise::from_seeds(&[99]);
        let perlin = PerlinNoise::new(99);
        for i in 0..32 {
            let (x, y) = (i as f64 * 0.41 + 0.07, i as f64 * 0.23 - 1.3);
            let expected = (perlin.compute(x, y) + 1.0) / 2.0;
            assert!((octave.compute(x, y) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn construction_is_deterministic_for_a_seeded_rng() {
        let a = OctaveNoise::new(8, &mut Rng::with_seed(5));
        let b = OctaveNoise::new(8, &mut Rng::with_seed(5));
        assert_eq!(a.octaves(), 8);
        assert_eq!(a.seeds(), b.seeds());
        assert_eq!(a.compute(3.3, -7.1), b.compute(3.3, -7.1));
    }

    #[test]
    fn higher_octaves_add_detail() {
        let seeds = [11, 12, 13, 14];
        let coarse = OctaveNoise::from_seeds(&seeds[..1]);
        let fine = OctaveNoise::from_seeds(&seeds);
        let differs = (0..32).any(|i| {
            let (x, y) = (i as f64 * 0.31 + 0.05, i as f64 * 0.17 + 0.45);
            coarse.compute(x, y) != fine.compute(x, y)
        });
        assert!(differs);
    }
}
