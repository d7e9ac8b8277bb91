//! 调度器
//!
//! 驱动整个回放：独占待执行缓冲区，每个 tick 取出完成时间最早的事件，
//! 询问其 Sequencer 是否应由更高优先级的事件先执行，执行胜出者，
//! 若它仍有下游则按完成时间放回缓冲区。

use std::collections::HashMap;

use serde::Serialize;

use super::event::Event;
use super::pending::PendingBuffer;
use super::time::SimTime;
use crate::component::{ComponentId, Network};
use crate::error::{Error, Result};
use tracing::{debug, info, trace};

/// 一次运行的汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub generated: u64,
    pub completed: u64,
    pub preemptions: u64,
    pub final_time: SimTime,
}

#[derive(Debug)]
pub struct Scheduler {
    net: Network,
    horizon: SimTime,
    buffer: PendingBuffer,
    /// 每个入口最新产生、尚未被取出的到达（来源 -> 序号）
    fresh: HashMap<ComponentId, u64>,
    seeded: bool,
    now: SimTime,
    summary: RunSummary,
}

impl Scheduler {
    /// 只接受已编译且通过校验的网络，以及有限的生成上限
    pub fn new(net: Network, horizon: SimTime) -> Result<Self> {
        if !horizon.as_f64().is_finite() {
            return Err(Error::Definition(format!(
                "generation horizon must be finite, got {horizon}"
            )));
        }
        net.ensure_runnable()?;
        Ok(Self {
            net,
            horizon,
            buffer: PendingBuffer::new(),
            fresh: HashMap::new(),
            seeded: false,
            now: SimTime::ZERO,
            summary: RunSummary::default(),
        })
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn network(&self) -> &Network {
        &self.net
    }

    pub fn into_network(self) -> Network {
        self.net
    }

    pub fn pending(&self) -> &PendingBuffer {
        &self.buffer
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// 把外部事件放入缓冲区（例如经 `Network::inject` 绑定过下游的事件）
    pub fn schedule(&mut self, ev: Event) {
        if !ev.is_terminal() {
            self.buffer.insert(ev);
        }
    }

    /// 为来源产生下一个到达；超出上限时该来源停止产生
    fn replenish(&mut self, source: ComponentId) -> Result<()> {
        if let Some(ev) = self.net.generate(source, Some(self.horizon))? {
            trace!(source = ?source, label = ev.label, at = %ev.completed, "产生到达");
            self.summary.generated += 1;
            if ev.is_terminal() {
                self.summary.completed += 1;
            } else {
                self.fresh.insert(source, ev.label);
                self.buffer.insert(ev);
            }
        }
        Ok(())
    }

    /// 来源最新的到达第一次被取出时，补上该来源的下一个到达
    fn refresh(&mut self, source: ComponentId, label: u64) -> Result<()> {
        if self.fresh.get(&source) == Some(&label) {
            self.fresh.remove(&source);
            self.replenish(source)?;
        }
        Ok(())
    }

    /// 每个入口播种一个到达
    pub fn seed(&mut self) -> Result<()> {
        if self.seeded {
            return Ok(());
        }
        self.seeded = true;
        for source in self.net.entry_points().to_vec() {
            self.replenish(source)?;
        }
        debug!(pending = self.buffer.len(), "🌱 播种完成");
        Ok(())
    }

    /// 执行一个 tick；缓冲区为空时返回 false
    pub fn step(&mut self) -> Result<bool> {
        let Some(head) = self.buffer.pop_front() else {
            return Ok(false);
        };
        let (head_source, head_label) = (head.source, head.label);
        self.refresh(head_source, head_label)?;

        let mut ev = head.prioritize(&mut self.buffer, false, &self.net);
        if (ev.source, ev.label) != (head_source, head_label) {
            self.summary.preemptions += 1;
            // 抢先者可能是尚未被取出过的最新到达
            self.refresh(ev.source, ev.label)?;
        }

        self.now = self.now.max(ev.completed);
        ev.simulate(&mut self.net)?;
        self.summary.ticks += 1;

        if ev.is_terminal() {
            self.summary.completed += 1;
        } else {
            self.buffer.insert(ev);
        }
        Ok(true)
    }

    /// 运行直到缓冲区为空
    #[tracing::instrument(skip(self), fields(horizon = %self.horizon))]
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("▶️  开始运行仿真");
        self.seed()?;
        while self.step()? {}
        self.summary.final_time = self.now;
        info!(
            ticks = self.summary.ticks,
            generated = self.summary.generated,
            completed = self.summary.completed,
            preemptions = self.summary.preemptions,
            final_time = %self.now,
            "✅ 仿真完成"
        );
        Ok(self.summary.clone())
    }

    /// 清空缓冲区并重置整个网络，之后可以重新 `run()`
    pub fn reset(&mut self) -> usize {
        self.buffer = PendingBuffer::new();
        self.fresh.clear();
        self.seeded = false;
        self.now = SimTime::ZERO;
        self.summary = RunSummary::default();
        self.net.reset()
    }
}
