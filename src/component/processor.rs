//! Processor：单服务台、先到先服务的主动站点

use super::id::ComponentId;
use crate::generator::Binding;
use crate::sim::{Event, Sequencer, SimTime};
use tracing::trace;

#[derive(Debug)]
pub struct Processor {
    binding: Binding,
    /// 下一次空闲的时刻
    available: SimTime,
}

impl Processor {
    pub fn new(binding: Binding) -> Self {
        Self {
            binding,
            available: SimTime::ZERO,
        }
    }

    pub fn available(&self) -> SimTime {
        self.available
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    pub(crate) fn simulate(&mut self, ev: &mut Event) {
        let arrival = ev.completed;
        self.available = self.available.max(arrival);
        let duration = self.binding.generate();
        let completed = self.available + duration;

        ev.arrived = arrival;
        ev.started = self.available;
        ev.completed = completed;
        ev.elapsed += completed - arrival;
        ev.executed += completed - self.available;
        self.available = completed;
        ev.component = self.binding.next();

        trace!(
            arrival = %arrival,
            started = %ev.started,
            completed = %completed,
            "处理完成"
        );
    }

    /// 主动站点截断分支：种子阶段只标记自身，不声明优先级；
    /// 探索阶段若尚未确认在路径上则视为分支外。
    pub(crate) fn prioritize(&self, id: ComponentId, seq: &mut Sequencer, exploring: bool) {
        if exploring {
            seq.exclude(Some(id));
        } else {
            seq.add_path(id);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.available = SimTime::ZERO;
        self.binding.reset();
    }
}
