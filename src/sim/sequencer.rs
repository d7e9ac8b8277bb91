//! 优先级前瞻（Sequencer）
//!
//! 调度循环每个 tick 取出完成时间最早的事件后，由它内嵌的 Sequencer 判断
//! 缓冲区里是否有更高优先级的事件应当先执行：
//!
//! 1. 缓冲区为空则不重排。
//! 2. 以被选事件当前站点的可用时间作为前瞻上限：晚于它完成的事件不可能抢先。
//! 3. 种子阶段：从当前站点沿下游走，遇到的第一个 Throttle 声明优先级顺序，
//!    途经的站点记入路径集合；遇到 Sink 则清空声明。
//! 4. 没有声明顺序则不重排。
//! 5. 分类阶段：从上限内候选事件所在的站点出发再走一遍，途经的 Balancer 先作为
//!    待定参与者；走到路径集合内的站点则全部提升为路径，走到其他终点则全部排除。
//! 6. 按完成时间升序扫描候选：来源不同、来源在声明集合内、当前站点在路径集合内
//!    才有资格。
//! 7. 每个级别只保留最早的候选；0 级是绝对优先，遇到即停止扫描。
//! 8. 若最佳候选级别严格高于被选事件，它被移出缓冲区并返回。

use std::collections::HashSet;

use super::event::Event;
use super::pending::PendingBuffer;
use super::time::SimTime;
use crate::component::{ComponentId, Network};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    available: SimTime,
    paths: HashSet<ComponentId>,
    exclusions: HashSet<ComponentId>,
    participants: HashSet<ComponentId>,
    sources: Vec<ComponentId>,
    priorities: HashSet<ComponentId>,
}

impl Sequencer {
    pub fn clear(&mut self) {
        self.available = SimTime::ZERO;
        self.paths.clear();
        self.exclusions.clear();
        self.participants.clear();
        self.sources.clear();
        self.priorities.clear();
    }

    /// 锁定的前瞻上限
    pub fn available(&self) -> SimTime {
        self.available
    }

    pub fn paths(&self) -> &HashSet<ComponentId> {
        &self.paths
    }

    pub fn exclusions(&self) -> &HashSet<ComponentId> {
        &self.exclusions
    }

    /// 声明的优先级顺序（最高在前）
    pub fn sources(&self) -> &[ComponentId] {
        &self.sources
    }

    pub fn is_path(&self, id: ComponentId) -> bool {
        self.paths.contains(&id)
    }

    pub fn is_excluded(&self, id: ComponentId) -> bool {
        self.exclusions.contains(&id)
    }

    pub(crate) fn add_path(&mut self, id: ComponentId) {
        self.paths.insert(id);
    }

    /// 记为待定；已经待定说明走回了自身，返回 false
    pub(crate) fn add_participant(&mut self, id: ComponentId) -> bool {
        self.participants.insert(id)
    }

    pub(crate) fn declare(&mut self, sources: &[ComponentId]) {
        self.sources = sources.to_vec();
        self.priorities = sources.iter().copied().collect();
    }

    pub(crate) fn clear_sources(&mut self) {
        self.sources.clear();
        self.priorities.clear();
    }

    /// 全部待定参与者确认在路径上
    pub(crate) fn promote(&mut self) {
        self.paths.extend(self.participants.drain());
    }

    /// 全部待定参与者（以及 `id`）确认在分支外
    pub(crate) fn exclude(&mut self, id: Option<ComponentId>) {
        self.exclusions.extend(self.participants.drain());
        if let Some(id) = id {
            self.exclusions.insert(id);
        }
    }

    fn rank(&self, source: ComponentId) -> usize {
        self.sources
            .iter()
            .position(|s| *s == source)
            .unwrap_or(usize::MAX)
    }

    /// 对 `chosen` 做优先级前瞻；若应由缓冲区中的另一事件先执行，
    /// 把它移出缓冲区并返回。
    #[tracing::instrument(skip_all, fields(event_source = ?chosen.source, event_label = chosen.label, pending = buffer.len()))]
    pub fn lookahead(
        &mut self,
        chosen: &Event,
        buffer: &mut PendingBuffer,
        net: &Network,
    ) -> Option<Event> {
        self.clear();
        if buffer.is_empty() {
            return None;
        }
        let current = chosen.component?;
        self.available = net.available(current);

        net.prioritize(current, self, false);
        if self.sources.is_empty() {
            trace!("没有声明优先级，不重排");
            return None;
        }

        let horizon = self.available;
        let starts: Vec<ComponentId> = buffer
            .iter()
            .take_while(|e| e.completed <= horizon)
            .filter_map(|e| e.component)
            .collect();
        for start in starts {
            if self.is_path(start) || self.is_excluded(start) {
                continue;
            }
            self.participants.clear();
            net.prioritize(start, self, true);
        }

        let own = self.rank(chosen.source);
        if own == 0 {
            return None;
        }

        let mut best: Option<(usize, usize)> = None;
        for (idx, cand) in buffer.iter().enumerate() {
            if cand.completed > horizon {
                break;
            }
            if cand.source == chosen.source || !self.priorities.contains(&cand.source) {
                continue;
            }
            let Some(at) = cand.component else {
                continue;
            };
            if !self.paths.contains(&at) {
                continue;
            }
            let rank = self.rank(cand.source);
            if best.is_none_or(|(r, _)| rank < r) {
                best = Some((rank, idx));
            }
            if rank == 0 {
                break;
            }
        }

        match best {
            Some((rank, idx)) if rank < own => {
                let winner = buffer.remove(idx)?;
                debug!(
                    winner_source = ?winner.source,
                    winner_label = winner.label,
                    rank,
                    own_rank = own,
                    horizon = %horizon,
                    "⏫ 高优先级事件抢先"
                );
                Some(winner)
            }
            _ => None,
        }
    }
}
