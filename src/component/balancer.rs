//! Balancer：零服务时间的扇出站点
//!
//! 自身不增加延迟，由持有的 Distributor 选择下游。

use super::id::ComponentId;
use super::network::Network;
use crate::distributor::Distributor;
use crate::sim::{Event, Sequencer, SimTime};

#[derive(Debug)]
pub struct Balancer {
    distributor: Box<dyn Distributor>,
}

impl Balancer {
    pub fn new(distributor: Box<dyn Distributor>) -> Self {
        Self { distributor }
    }

    pub fn distributor(&self) -> &dyn Distributor {
        self.distributor.as_ref()
    }

    pub(crate) fn distributor_mut(&mut self) -> &mut dyn Distributor {
        self.distributor.as_mut()
    }

    /// 预览当前会被选中的下游的可用时间
    pub fn available(&self, net: &Network) -> Option<SimTime> {
        self.distributor.available(net)
    }

    /// 对齐时间戳并剥离下游，返回写入日志的快照
    pub(crate) fn admit(&self, ev: &mut Event) -> Event {
        let t = ev.completed;
        ev.arrived = t;
        ev.started = t;
        ev.component = None;
        ev.snapshot()
    }

    pub(crate) fn prioritize(
        &self,
        id: ComponentId,
        seq: &mut Sequencer,
        exploring: bool,
        net: &Network,
    ) {
        if exploring {
            if !seq.add_participant(id) {
                seq.exclude(None);
                return;
            }
        } else {
            seq.add_path(id);
        }
        match self.distributor.peek(net) {
            Some(next) => net.prioritize(next, seq, exploring),
            None if exploring => seq.exclude(Some(id)),
            None => {}
        }
    }

    pub(crate) fn reset(&mut self) {
        self.distributor.reset();
    }
}
