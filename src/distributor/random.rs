//! 均匀随机分发
//!
//! RNG 由构造方注入种子，`reset()` 重新播种。

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::{Cell, RefCell};

use super::{Distributor, Policy, Targets};
use crate::component::Network;

#[derive(Debug)]
pub struct Random {
    targets: Targets,
    seed: u64,
    rng: RefCell<ChaCha8Rng>,
    /// `available()` 预览留下的抽样，由下一次 `assign()` 消费
    peeked: Cell<Option<usize>>,
}

impl Random {
    pub fn new(labels: Vec<String>, seed: u64) -> Self {
        Self {
            targets: Targets::new(labels),
            seed,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
            peeked: Cell::new(None),
        }
    }

    fn draw(&self) -> Option<usize> {
        let n = self.targets.len();
        (n > 0).then(|| self.rng.borrow_mut().gen_range(0..n))
    }
}

impl Distributor for Random {
    fn policy(&self) -> Policy {
        Policy::Random
    }

    fn targets(&self) -> &Targets {
        &self.targets
    }

    fn targets_mut(&mut self) -> &mut Targets {
        &mut self.targets
    }

    fn peek_index(&self, _net: &Network) -> Option<usize> {
        if let Some(idx) = self.peeked.get() {
            return Some(idx);
        }
        let idx = self.draw()?;
        self.peeked.set(Some(idx));
        Some(idx)
    }

    fn select_index(&self, _net: &Network) -> Option<usize> {
        self.peeked.take().or_else(|| self.draw())
    }

    fn reset(&self) {
        self.peeked.set(None);
        *self.rng.borrow_mut() = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
