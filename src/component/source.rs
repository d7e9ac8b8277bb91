//! Source：事件产生站点
//!
//! 用累积时钟产生到达：每次推进一个生成器时长，新事件的
//! arrived/started/completed 都等于推进后的时钟。

use super::id::ComponentId;
use crate::generator::Binding;
use crate::sim::{Event, SimTime};
use tracing::trace;

#[derive(Debug)]
pub struct Source {
    binding: Binding,
    clock: SimTime,
    count: u64,
}

impl Source {
    pub fn new(binding: Binding) -> Self {
        Self {
            binding,
            clock: SimTime::ZERO,
            count: 0,
        }
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    /// 已产生的事件数
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    pub fn next(&self) -> Option<ComponentId> {
        self.binding.next()
    }

    /// 产生下一个事件。
    ///
    /// 若新到达时间不早于 `horizon`，不提交时钟也不计数，返回 `None`。
    pub(crate) fn generate(&mut self, id: ComponentId, horizon: Option<SimTime>) -> Option<Event> {
        let at = self.clock + self.binding.generate();
        if horizon.is_some_and(|h| at >= h) {
            trace!(at = %at, "到达时间超出生成上限");
            return None;
        }
        self.clock = at;
        self.count += 1;
        let mut ev = Event::new(id, self.count, at);
        ev.component = self.binding.next();
        Some(ev)
    }

    /// 原样接收外部事件（串接在其他来源之后），只绑定下游
    pub(crate) fn accept(&mut self, ev: &mut Event) {
        ev.component = self.binding.next();
    }

    pub(crate) fn reset(&mut self) {
        self.clock = SimTime::ZERO;
        self.count = 0;
        self.binding.reset();
    }
}
