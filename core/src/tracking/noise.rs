use crate::prelude::NoiseSource;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform drift source backed by a seedable PRNG.
pub struct UniformNoise {
    rng: StdRng,
}

impl UniformNoise {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant so a session replays the same drift sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for UniformNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>() - 0.5
    }
}

/// Replays a fixed cycle of unit samples.
pub struct ScriptedNoise {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedNoise {
    pub fn cycle(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }

    pub fn steady(sample: f64) -> Self {
        Self::cycle(vec![sample])
    }
}

impl NoiseSource for ScriptedNoise {
    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        sample
    }
}
