use std::cell::Cell;

use super::{Distributor, Policy, Targets};
use crate::component::Network;

/// 轮询：每次 `assign` 推进一格
#[derive(Debug)]
pub struct RoundRobin {
    targets: Targets,
    cursor: Cell<usize>,
}

impl RoundRobin {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            targets: Targets::new(labels),
            cursor: Cell::new(0),
        }
    }
}

impl Distributor for RoundRobin {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn targets(&self) -> &Targets {
        &self.targets
    }

    fn targets_mut(&mut self) -> &mut Targets {
        &mut self.targets
    }

    fn peek_index(&self, _net: &Network) -> Option<usize> {
        let n = self.targets.len();
        (n > 0).then(|| self.cursor.get() % n)
    }

    fn select_index(&self, net: &Network) -> Option<usize> {
        let idx = self.peek_index(net)?;
        self.cursor.set((idx + 1) % self.targets.len());
        Some(idx)
    }

    fn reset(&self) {
        self.cursor.set(0);
    }
}
