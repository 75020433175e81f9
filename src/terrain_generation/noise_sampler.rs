use noise::{NoiseFn, Simplex};
use std::fmt;

/// Seeded 2D gradient noise.
///
/// Output lies roughly in [-1, 1]. Sampling is a pure function of the seed and
/// the input position.
#[derive(Clone)]
pub struct NoiseSampler {
    seed: u32,
    source: Simplex,
}

impl NoiseSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            source: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.source.get([x, y])
    }

    /// Ridge-shaped sample, see [`ridge`]
    pub fn ridge_sample(&self, x: f64, y: f64) -> f64 {
        ridge(self.sample(x, y))
    }
}

impl fmt::Debug for NoiseSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseSampler").field("seed", &self.seed).finish()
    }
}

/// Reflect a noise value around 1 to sharpen crests: `2 * (1 - |1 - n|)`
pub fn ridge(n: f64) -> f64 {
    2.0 * (1.0 - (1.0 - n).abs())
}
