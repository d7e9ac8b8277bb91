use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::Generator;
use crate::error::{Error, Result};
use crate::sim::SimTime;

/// 正态分布；负的抽样值截断为 0
#[derive(Debug, Clone)]
pub struct Gaussian {
    mean: f64,
    std_dev: f64,
    seed: u64,
    dist: Normal<f64>,
    rng: ChaCha8Rng,
}

impl Gaussian {
    pub fn new(mean: f64, std_dev: f64, seed: u64) -> Result<Self> {
        let dist = Normal::new(mean, std_dev).map_err(|e| {
            Error::Definition(format!("gaussian({mean}, {std_dev}): {e}"))
        })?;
        Ok(Self {
            mean,
            std_dev,
            seed,
            dist,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl Generator for Gaussian {
    fn generate(&mut self) -> SimTime {
        SimTime::duration(self.dist.sample(&mut self.rng))
    }

    fn characteristics(&self) -> String {
        format!("gaussian(mean={}, std_dev={})", self.mean, self.std_dev)
    }

    // 负值截断为 0：只有退化成非正常数时才无法前进
    fn can_advance(&self) -> bool {
        self.mean > 0.0 || self.std_dev > 0.0
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
