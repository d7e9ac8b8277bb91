//! 事件记录
//!
//! 一个事件就是网络中流动的一份流量：身份（来源、序号、创建时间）、
//! 在当前站点的时间戳，以及下一个要访问的组件句柄。

use serde::Serialize;
use tracing::{debug, trace};

use super::pending::PendingBuffer;
use super::sequencer::Sequencer;
use super::time::SimTime;
use crate::component::{ComponentId, Network};
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// 产生该事件的 Source
    pub source: ComponentId,
    /// 来源内的序号（从 1 开始）
    pub label: u64,
    created: SimTime,
    /// 到达当前站点的时间
    pub arrived: SimTime,
    /// 在当前站点开始服务的时间
    pub started: SimTime,
    /// 在当前站点完成的时间，即下一次动作的时间
    pub completed: SimTime,
    /// 累计的主动处理时长（仅 Processor 计入）
    pub executed: SimTime,
    /// 自进入网络以来累计经历的时长
    pub elapsed: SimTime,
    /// 离开网络时固定：completed - created
    pub lifetime: Option<SimTime>,
    /// 下一个要访问的组件；`None` 表示已离开网络
    pub component: Option<ComponentId>,
    /// 离开网络前最后访问的站点标签
    pub last: Option<String>,
    #[serde(skip)]
    sequencer: Sequencer,
}

impl Event {
    pub fn new(source: ComponentId, label: u64, created: SimTime) -> Self {
        Self {
            source,
            label,
            created,
            arrived: created,
            started: created,
            completed: created,
            executed: SimTime::ZERO,
            elapsed: SimTime::ZERO,
            lifetime: None,
            component: None,
            last: None,
            sequencer: Sequencer::default(),
        }
    }

    pub fn created(&self) -> SimTime {
        self.created
    }

    /// 是否已离开网络
    pub fn is_terminal(&self) -> bool {
        self.component.is_none()
    }

    /// 写入组件日志的快照：不携带排序状态
    pub fn snapshot(&self) -> Event {
        Event {
            sequencer: Sequencer::default(),
            last: self.last.clone(),
            ..*self
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// 在当前组件上执行一步。
    ///
    /// 访问主动站点（Processor）后，内嵌 Sequencer 记录的分支信息失效并被清空。
    /// 若执行后不再有下游组件，则记录最后站点并固定 lifetime。
    #[tracing::instrument(skip(self, net), fields(event_source = ?self.source, event_label = self.label))]
    pub fn simulate(&mut self, net: &mut Network) -> Result<()> {
        let Some(current) = self.component else {
            trace!("事件已离开网络，忽略");
            return Ok(());
        };

        net.visit(current, self)?;

        if net.is_active(current) {
            self.sequencer.clear();
        }

        if self.component.is_none() {
            let label = net.label(current).to_string();
            let lifetime = self.completed.saturating_sub(self.created);
            debug!(last = %label, lifetime = %lifetime, "🏁 事件离开网络");
            self.last = Some(label);
            self.lifetime = Some(lifetime);
        }
        Ok(())
    }

    /// 决定本 tick 实际执行哪个事件。
    ///
    /// `locked` 为真时调用方仍处于同一 tick 的非主动站点链路中，不允许抢占。
    /// 否则交给内嵌 Sequencer 在 `buffer` 上做优先级前瞻；若有更高优先级的
    /// 候选，它被移出缓冲区并返回，本事件被放回缓冲区队首。
    pub fn prioritize(mut self, buffer: &mut PendingBuffer, locked: bool, net: &Network) -> Event {
        if locked {
            return self;
        }
        let mut sequencer = std::mem::take(&mut self.sequencer);
        let winner = sequencer.lookahead(&self, buffer, net);
        self.sequencer = sequencer;
        match winner {
            Some(winner) => {
                buffer.push_front(self);
                winner
            }
            None => self,
        }
    }
}
