//! 待执行事件缓冲区
//!
//! 按 `completed`（下一次动作时间）升序保存事件。完成时间相同的事件按插入顺序排列，
//! 先到先服务。缓冲区由调度循环独占，并以引用形式交给 Sequencer。

use std::collections::VecDeque;

use super::event::Event;

#[derive(Debug, Default)]
pub struct PendingBuffer {
    q: VecDeque<Event>,
}

impl PendingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 按完成时间插入，排在所有完成时间不晚于它的事件之后
    pub fn insert(&mut self, ev: Event) {
        let at = self.q.partition_point(|e| e.completed <= ev.completed);
        self.q.insert(at, ev);
    }

    /// 放回队首：被抢占的事件在下一个 tick 重试
    pub fn push_front(&mut self, ev: Event) {
        self.q.push_front(ev);
    }

    pub fn pop_front(&mut self) -> Option<Event> {
        self.q.pop_front()
    }

    pub fn front(&self) -> Option<&Event> {
        self.q.front()
    }

    pub fn remove(&mut self, idx: usize) -> Option<Event> {
        self.q.remove(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.q.iter()
    }
}
