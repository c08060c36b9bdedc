//! # Noise Generators
//!
//! Seeded 2-D noise used by terrain synthesis. Three generators share the [`Noise`]
//! capability and compose freely:
//!
//! * [`PerlinNoise`] - a single seeded gradient noise field in `[-1, 1]`
//! * [`OctaveNoise`] - a fractal sum of independently seeded Perlin fields, remapped
//!   to roughly `[0, 1]`
//! * [`CombinedNoise`] - domain warping: one source perturbs the X input of another
//!
//! Every generator is pure: the same construction parameters and coordinates always
//! produce the same value, which is what lets chunks be regenerated from the world
//! seed alone.

mod combined;
mod octave;
mod perlin;

pub use combined::CombinedNoise;
pub use octave::OctaveNoise;
pub use perlin::PerlinNoise;

/// A deterministic 2-D noise field.
///
/// Generators are shared between terrain workers, hence the `Send + Sync` bound.
pub trait Noise: Send + Sync {
    /// Samples the field at `(x, y)`.
    fn compute(&self, x: f64, y: f64) -> f64;
}
