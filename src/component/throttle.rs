//! Throttle：按来源限速的闸门
//!
//! 每个来源对应一条规则（冷却生成器 + 下游），未列出的来源走通配规则。
//! 冷却占用的是站点而不是事件：事件自身的服务时长为 0，
//! 代价体现为站点可用时间的推进。

use std::collections::HashMap;

use super::id::ComponentId;
use crate::error::{Error, Result};
use crate::generator::Binding;
use crate::sim::{Event, Sequencer, SimTime};
use tracing::trace;

#[derive(Debug)]
pub struct Throttle {
    rules: Vec<Binding>,
    by_source: HashMap<ComponentId, usize>,
    fallback: Option<usize>,
    /// 声明的优先级顺序（最高在前），链接阶段按规则顺序生成
    sources: Vec<ComponentId>,
    available: SimTime,
}

impl Throttle {
    pub fn new(rules: Vec<Binding>) -> Self {
        Self {
            rules,
            by_source: HashMap::new(),
            fallback: None,
            sources: Vec::new(),
            available: SimTime::ZERO,
        }
    }

    pub fn available(&self) -> SimTime {
        self.available
    }

    pub fn rules(&self) -> &[Binding] {
        &self.rules
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [Binding] {
        &mut self.rules
    }

    pub fn sources(&self) -> &[ComponentId] {
        &self.sources
    }

    /// 根据已解析的规则重建来源索引与优先级顺序
    pub(crate) fn index_rules(&mut self) {
        self.by_source.clear();
        self.sources.clear();
        self.fallback = None;
        for (i, rule) in self.rules.iter().enumerate() {
            match rule.source() {
                Some(src) => {
                    if !self.by_source.contains_key(&src) {
                        self.by_source.insert(src, i);
                        self.sources.push(src);
                    }
                }
                None if rule.is_wildcard() => {
                    self.fallback.get_or_insert(i);
                }
                None => {}
            }
        }
    }

    fn select(&self, source: ComponentId) -> Option<usize> {
        self.by_source.get(&source).copied().or(self.fallback)
    }

    pub(crate) fn simulate(&mut self, ev: &mut Event, label: &str) -> Result<()> {
        let Some(idx) = self.select(ev.source) else {
            return Err(Error::UnresolvedReference(format!(
                "throttle '{label}' has no rule for source {:?}",
                ev.source
            )));
        };
        let arrival = ev.completed;
        self.available = self.available.max(arrival);

        ev.arrived = arrival;
        ev.started = self.available;
        ev.completed = self.available;
        ev.elapsed += self.available - arrival;

        let rule = &mut self.rules[idx];
        let cooldown = rule.generate();
        self.available += cooldown;
        ev.component = rule.next();

        trace!(
            arrival = %arrival,
            passed = %ev.completed,
            cooldown = %cooldown,
            available = %self.available,
            "通过闸门"
        );
        Ok(())
    }

    pub(crate) fn prioritize(&self, id: ComponentId, seq: &mut Sequencer, exploring: bool) {
        if exploring {
            seq.exclude(Some(id));
        } else {
            seq.declare(&self.sources);
            seq.add_path(id);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.available = SimTime::ZERO;
        for rule in &mut self.rules {
            rule.reset();
        }
    }
}
