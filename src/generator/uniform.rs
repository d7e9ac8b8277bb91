use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform as UniformDist};
use rand_chacha::ChaCha8Rng;

use super::Generator;
use crate::error::{Error, Result};
use crate::sim::SimTime;

/// [min, max] 上的均匀分布
#[derive(Debug, Clone)]
pub struct Uniform {
    min: f64,
    max: f64,
    seed: u64,
    dist: UniformDist<f64>,
    rng: ChaCha8Rng,
}

impl Uniform {
    pub fn new(min: f64, max: f64, seed: u64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(Error::Definition(format!(
                "uniform generator needs 0 <= min <= max, got [{min}, {max}]"
            )));
        }
        Ok(Self {
            min,
            max,
            seed,
            dist: UniformDist::new_inclusive(min, max),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl Generator for Uniform {
    fn generate(&mut self) -> SimTime {
        SimTime::duration(self.dist.sample(&mut self.rng))
    }

    fn characteristics(&self) -> String {
        format!("uniform({}, {})", self.min, self.max)
    }

    fn can_advance(&self) -> bool {
        self.max > 0.0
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
