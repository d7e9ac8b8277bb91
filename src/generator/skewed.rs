//! 右偏分布
//!
//! 以对数正态实现，参数给的是结果分布本身的均值与标准差：
//! sigma^2 = ln(1 + s^2 / m^2)，mu = ln(m) - sigma^2 / 2。

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

use super::Generator;
use crate::error::{Error, Result};
use crate::sim::SimTime;

#[derive(Debug, Clone)]
pub struct Skewed {
    mean: f64,
    std_dev: f64,
    seed: u64,
    dist: LogNormal<f64>,
    rng: ChaCha8Rng,
}

impl Skewed {
    pub fn new(mean: f64, std_dev: f64, seed: u64) -> Result<Self> {
        if !(mean.is_finite() && std_dev.is_finite()) || mean <= 0.0 || std_dev < 0.0 {
            return Err(Error::Definition(format!(
                "skewed generator needs mean > 0 and std_dev >= 0, got ({mean}, {std_dev})"
            )));
        }
        let sigma2 = (1.0 + (std_dev * std_dev) / (mean * mean)).ln();
        let mu = mean.ln() - sigma2 / 2.0;
        let dist = LogNormal::new(mu, sigma2.sqrt())
            .map_err(|e| Error::Definition(format!("skewed({mean}, {std_dev}): {e}")))?;
        Ok(Self {
            mean,
            std_dev,
            seed,
            dist,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl Generator for Skewed {
    fn generate(&mut self) -> SimTime {
        SimTime::duration(self.dist.sample(&mut self.rng))
    }

    fn characteristics(&self) -> String {
        format!("skewed(mean={}, std_dev={})", self.mean, self.std_dev)
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
