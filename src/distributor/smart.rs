//! 最早可用优先
//!
//! 选择可用时间最小的下游，相同则取声明顺序靠前者。
//! 与 Random 相同的预览缓存规则：预览过的选择由下一次 `assign()` 沿用，
//! 即使期间下游的可用时间发生了变化。

use std::cell::Cell;

use super::{Distributor, Policy, Targets};
use crate::component::Network;

#[derive(Debug)]
pub struct Smart {
    targets: Targets,
    peeked: Cell<Option<usize>>,
}

impl Smart {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            targets: Targets::new(labels),
            peeked: Cell::new(None),
        }
    }

    fn choose(&self, net: &Network) -> Option<usize> {
        let mut best = None;
        for idx in 0..self.targets.len() {
            let Some(id) = self.targets.get(idx) else {
                continue;
            };
            let at = net.available(id);
            match best {
                Some((_, t)) if at >= t => {}
                _ => best = Some((idx, at)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

impl Distributor for Smart {
    fn policy(&self) -> Policy {
        Policy::Smart
    }

    fn targets(&self) -> &Targets {
        &self.targets
    }

    fn targets_mut(&mut self) -> &mut Targets {
        &mut self.targets
    }

    fn peek_index(&self, net: &Network) -> Option<usize> {
        if let Some(idx) = self.peeked.get() {
            return Some(idx);
        }
        let idx = self.choose(net)?;
        self.peeked.set(Some(idx));
        Some(idx)
    }

    fn select_index(&self, net: &Network) -> Option<usize> {
        self.peeked.take().or_else(|| self.choose(net))
    }

    fn reset(&self) {
        self.peeked.set(None);
    }
}
