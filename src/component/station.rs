//! 组件（站点）
//!
//! 每个站点都有标签、本地按时间顺序的事件快照日志、监控开关，
//! 以及各自模型的可变状态。

use serde::Serialize;
use std::fmt;

use super::balancer::Balancer;
use super::id::ComponentId;
use super::processor::Processor;
use super::sink::Sink;
use super::source::Source;
use super::throttle::Throttle;
use crate::sim::{Event, SimTime};

/// 站点模型
#[derive(Debug)]
pub enum Model {
    Source(Source),
    Processor(Processor),
    Sink(Sink),
    Balancer(Balancer),
    Throttle(Throttle),
}

/// 站点类别（用于报告与校验信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Source,
    Processor,
    Sink,
    Balancer,
    Throttle,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::Source => "source",
            ComponentKind::Processor => "processor",
            ComponentKind::Sink => "sink",
            ComponentKind::Balancer => "balancer",
            ComponentKind::Throttle => "throttle",
        };
        f.write_str(s)
    }
}

impl Model {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Model::Source(_) => ComponentKind::Source,
            Model::Processor(_) => ComponentKind::Processor,
            Model::Sink(_) => ComponentKind::Sink,
            Model::Balancer(_) => ComponentKind::Balancer,
            Model::Throttle(_) => ComponentKind::Throttle,
        }
    }

    /// 直接下游（按声明顺序）
    pub fn downstream(&self) -> Vec<ComponentId> {
        match self {
            Model::Source(s) => s.next().into_iter().collect(),
            Model::Processor(p) => p.binding().next().into_iter().collect(),
            Model::Sink(_) => Vec::new(),
            Model::Balancer(b) => b.distributor().connections(),
            Model::Throttle(t) => t.rules().iter().filter_map(|r| r.next()).collect(),
        }
    }

    /// 所持生成器/分发策略的描述
    pub fn characteristics(&self) -> Vec<String> {
        match self {
            Model::Source(s) => vec![s.binding().characteristics()],
            Model::Processor(p) => vec![p.binding().characteristics()],
            Model::Sink(_) => Vec::new(),
            Model::Balancer(b) => vec![b.distributor().policy().to_string()],
            Model::Throttle(t) => t
                .rules()
                .iter()
                .map(|r| match r.source_label() {
                    Some(src) => format!("{src}: {}", r.characteristics()),
                    None => format!("*: {}", r.characteristics()),
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
pub struct Component {
    id: ComponentId,
    pub(crate) label: String,
    monitor: bool,
    pub(crate) log: Vec<Event>,
    depths: Vec<(SimTime, u64)>,
    pub(crate) model: Model,
}

impl Component {
    pub(crate) fn new(id: ComponentId, label: String, model: Model) -> Self {
        Self {
            id,
            label,
            monitor: false,
            log: Vec::new(),
            depths: Vec::new(),
            model,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ComponentKind {
        self.model.kind()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn is_monitored(&self) -> bool {
        self.monitor
    }

    pub fn set_monitor(&mut self, on: bool) {
        self.monitor = on;
    }

    /// 已完成事件的快照，按处理顺序
    pub fn log(&self) -> &[Event] {
        &self.log
    }

    /// 队列深度采样：(到达时间, 深度)
    pub fn depths(&self) -> &[(SimTime, u64)] {
        &self.depths
    }

    pub(crate) fn record(&mut self, snapshot: Event, depth: Option<u64>) {
        if let Some(d) = depth {
            self.depths.push((snapshot.arrived, d));
        }
        self.log.push(snapshot);
    }

    pub(crate) fn reset(&mut self) {
        self.log.clear();
        self.depths.clear();
        match &mut self.model {
            Model::Source(s) => s.reset(),
            Model::Processor(p) => p.reset(),
            Model::Sink(s) => s.reset(),
            Model::Balancer(b) => b.reset(),
            Model::Throttle(t) => t.reset(),
        }
    }
}
