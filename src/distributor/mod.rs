//! 分发策略（Distributor）
//!
//! Balancer 通过分发器在一组固定、有序的下游之间选择。三种策略：
//! 轮询、均匀随机、以及选择最早可用下游的 Smart。
//!
//! 所有策略都遵守“预览即承诺”：`available()` 预览过的选择，
//! 下一次 `assign()` 必须沿用。状态放在 `Cell`/`RefCell` 中，
//! 这样预览只需要共享借用整个网络。

mod random;
mod round_robin;
mod smart;
mod targets;

pub use random::Random;
pub use round_robin::RoundRobin;
pub use smart::Smart;
pub use targets::Targets;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::component::{ComponentId, Network};
use crate::error::{Error, Result};
use crate::sim::{Event, SimTime};

/// 分发策略类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    RoundRobin,
    Random,
    Smart,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Policy::RoundRobin => "round_robin",
            Policy::Random => "random",
            Policy::Smart => "smart",
        };
        f.write_str(s)
    }
}

/// 按策略构造分发器；`seed` 只被随机策略使用
pub fn build(policy: Policy, labels: Vec<String>, seed: u64) -> Box<dyn Distributor> {
    match policy {
        Policy::RoundRobin => Box::new(RoundRobin::new(labels)),
        Policy::Random => Box::new(Random::new(labels, seed)),
        Policy::Smart => Box::new(Smart::new(labels)),
    }
}

/// 分发器抽象
pub trait Distributor: fmt::Debug {
    fn policy(&self) -> Policy;

    fn targets(&self) -> &Targets;

    fn targets_mut(&mut self) -> &mut Targets;

    /// 预览当前会被选中的槽位，不推进游标；随机类策略缓存这次抽样
    fn peek_index(&self, net: &Network) -> Option<usize>;

    /// 提交一次选择（优先消费预览缓存）
    fn select_index(&self, net: &Network) -> Option<usize>;

    /// 清空游标/缓存
    fn reset(&self);

    /// 声明的下游标签
    fn declared(&self) -> &[String] {
        self.targets().labels()
    }

    /// 已绑定的下游，按声明顺序
    fn connections(&self) -> Vec<ComponentId> {
        self.targets().connections()
    }

    /// 把组件绑定到标签对应的槽位
    fn add_next(&mut self, label: &str, id: ComponentId) -> bool {
        self.targets_mut().bind(label, id)
    }

    fn is_bound(&self) -> bool {
        self.targets().is_bound()
    }

    /// 当前会被选中的下游
    fn peek(&self, net: &Network) -> Option<ComponentId> {
        self.peek_index(net).and_then(|i| self.targets().get(i))
    }

    /// 预览当前会被选中的下游的可用时间
    fn available(&self, net: &Network) -> Option<SimTime> {
        self.peek(net).map(|id| net.available(id))
    }

    /// 选择下游并绑定到事件上
    fn assign(&self, ev: &mut Event, net: &Network) -> Result<()> {
        let target = self
            .select_index(net)
            .and_then(|i| self.targets().get(i))
            .ok_or_else(|| {
                Error::UnresolvedReference(format!(
                    "{} distributor over {:?} has no bound target",
                    self.policy(),
                    self.declared()
                ))
            })?;
        ev.component = Some(target);
        Ok(())
    }
}
