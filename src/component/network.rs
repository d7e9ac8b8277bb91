//! 组件注册表
//!
//! `Network` 持有全部站点，事件只携带 `ComponentId` 句柄。它同时承担
//! 外部“已编译网络”的职责：入口 Source 列表、按标签查找、编译标志与错误列表。

use std::collections::{HashMap, HashSet};

use super::balancer::Balancer;
use super::id::ComponentId;
use super::processor::Processor;
use super::sink::Sink;
use super::source::Source;
use super::station::{Component, ComponentKind, Model};
use super::throttle::Throttle;
use crate::distributor::Distributor;
use crate::error::{Error, Result};
use crate::generator::{Binding, Generator};
use crate::sim::{Event, Sequencer, SimTime};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Default)]
pub struct Network {
    components: Vec<Component>,
    labels: HashMap<String, ComponentId>,
    entry_points: Vec<ComponentId>,
    /// 构建阶段发现的错误（重复标签等），每次链接都会带上
    build_errors: Vec<String>,
    errors: Vec<String>,
    compiled: bool,
}

impl Network {
    fn add(&mut self, label: impl Into<String>, model: Model) -> ComponentId {
        let label = label.into();
        let id = ComponentId(self.components.len());
        if self.labels.contains_key(&label) {
            self.build_errors
                .push(format!("duplicate component label '{label}'"));
        } else {
            self.labels.insert(label.clone(), id);
        }
        debug!(label = %label, kind = %model.kind(), id = id.0, "添加组件");
        self.components.push(Component::new(id, label, model));
        self.compiled = false;
        id
    }

    /// 添加 Source，`next` 为下游标签
    pub fn add_source(
        &mut self,
        label: impl Into<String>,
        generator: Box<dyn Generator>,
        next: impl Into<String>,
    ) -> ComponentId {
        let binding = Binding::new(generator, Some(next.into()));
        self.add(label, Model::Source(Source::new(binding)))
    }

    /// 添加 Processor；`next` 为 `None` 时事件在此离开网络
    pub fn add_processor(
        &mut self,
        label: impl Into<String>,
        generator: Box<dyn Generator>,
        next: Option<&str>,
    ) -> ComponentId {
        let binding = Binding::new(generator, next.map(str::to_string));
        self.add(label, Model::Processor(Processor::new(binding)))
    }

    pub fn add_sink(&mut self, label: impl Into<String>) -> ComponentId {
        self.add(label, Model::Sink(Sink::new()))
    }

    pub fn add_balancer(
        &mut self,
        label: impl Into<String>,
        distributor: Box<dyn Distributor>,
    ) -> ComponentId {
        self.add(label, Model::Balancer(Balancer::new(distributor)))
    }

    /// 添加 Throttle；规则顺序即优先级顺序（最高在前）
    pub fn add_throttle(&mut self, label: impl Into<String>, rules: Vec<Binding>) -> ComponentId {
        self.add(label, Model::Throttle(Throttle::new(rules)))
    }

    pub fn set_monitor(&mut self, id: ComponentId, on: bool) {
        if let Some(c) = self.components.get_mut(id.0) {
            c.set_monitor(on);
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    pub fn lookup(&self, label: &str) -> Option<ComponentId> {
        self.labels.get(label).copied()
    }

    pub fn get(&self, label: &str) -> Option<&Component> {
        self.lookup(label).and_then(|id| self.component(id))
    }

    /// 标签；越界句柄返回空串
    pub fn label(&self, id: ComponentId) -> &str {
        self.components.get(id.0).map_or("", |c| c.label())
    }

    /// 调度循环需要逐个播种的入口 Source
    pub fn entry_points(&self) -> &[ComponentId] {
        &self.entry_points
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// 主动站点（会占用服务时长）
    pub fn is_active(&self, id: ComponentId) -> bool {
        matches!(
            self.components.get(id.0).map(|c| &c.model),
            Some(Model::Processor(_))
        )
    }

    /// 解析全部标签引用，重建入口列表并设置编译标志
    #[tracing::instrument(skip(self), fields(components = self.components.len()))]
    pub fn link(&mut self) -> bool {
        let mut errors = self.build_errors.clone();
        let kinds: Vec<ComponentKind> = self.components.iter().map(|c| c.kind()).collect();
        let labels = &self.labels;

        for c in &mut self.components {
            let owner = c.label().to_string();
            match &mut c.model {
                Model::Source(s) => {
                    let binding = s.binding_mut();
                    if !binding.can_advance() {
                        errors.push(format!("source '{owner}' generator cannot advance"));
                    }
                    match binding.next_label().map(str::to_string) {
                        Some(next) => {
                            if let Some(id) = resolve(&owner, &next, labels, &kinds, &mut errors) {
                                binding.set_next(id);
                            }
                        }
                        None => errors.push(format!("source '{owner}' has no downstream")),
                    }
                }
                Model::Processor(p) => {
                    let binding = p.binding_mut();
                    if let Some(next) = binding.next_label().map(str::to_string)
                        && let Some(id) = resolve(&owner, &next, labels, &kinds, &mut errors)
                    {
                        binding.set_next(id);
                    }
                }
                Model::Sink(_) => {}
                Model::Balancer(b) => {
                    let dist = b.distributor_mut();
                    let declared: Vec<String> = dist.declared().to_vec();
                    if declared.is_empty() {
                        errors.push(format!("balancer '{owner}' has no targets"));
                    }
                    for next in declared {
                        if let Some(id) = resolve(&owner, &next, labels, &kinds, &mut errors) {
                            dist.add_next(&next, id);
                        }
                    }
                }
                Model::Throttle(t) => {
                    link_throttle(&owner, t, labels, &kinds, &mut errors);
                }
            }
        }

        errors.extend(self.passthrough_cycles());

        self.entry_points = self
            .components
            .iter()
            .filter(|c| c.kind() == ComponentKind::Source)
            .map(|c| c.id())
            .collect();
        self.compiled = errors.is_empty();
        if self.compiled {
            info!(entry_points = self.entry_points.len(), "🔗 网络链接完成");
        } else {
            warn!(errors = errors.len(), "网络链接失败");
        }
        self.errors = errors;
        self.compiled
    }

    /// 只由 Balancer 组成的环会让可用性预览无限递归
    fn passthrough_cycles(&self) -> Vec<String> {
        // 0 = 未访问，1 = 在栈上，2 = 完成
        let mut color = vec![0u8; self.components.len()];
        let mut errors = Vec::new();
        for start in 0..self.components.len() {
            if color[start] != 0 || self.components[start].kind() != ComponentKind::Balancer {
                continue;
            }
            let mut stack = vec![(start, false)];
            while let Some((v, done)) = stack.pop() {
                if done {
                    color[v] = 2;
                    continue;
                }
                if color[v] != 0 {
                    continue;
                }
                color[v] = 1;
                stack.push((v, true));
                for next in self.components[v].model().downstream() {
                    let Some(n) = self.components.get(next.0) else {
                        continue;
                    };
                    if n.kind() != ComponentKind::Balancer {
                        continue;
                    }
                    match color[next.0] {
                        0 => stack.push((next.0, false)),
                        1 => errors.push(format!(
                            "pass-through cycle through balancer '{}'",
                            n.label()
                        )),
                        _ => {}
                    }
                }
            }
        }
        errors
    }

    /// 链接后的唯一校验：所有组件/分发器/生成器引用都已绑定
    pub fn validate(&self) -> Result<()> {
        let len = self.components.len();
        let bound = |id: Option<ComponentId>| id.is_some_and(|id| id.0 < len);
        let mut missing = Vec::new();

        for c in &self.components {
            match &c.model {
                Model::Source(s) => {
                    if !bound(s.next()) {
                        missing.push(format!("source '{}' downstream", c.label()));
                    }
                }
                Model::Processor(p) => {
                    let b = p.binding();
                    if b.next_label().is_some() && !bound(b.next()) {
                        missing.push(format!("processor '{}' downstream", c.label()));
                    }
                }
                Model::Sink(_) => {}
                Model::Balancer(b) => {
                    let d = b.distributor();
                    if !d.is_bound() || d.connections().iter().any(|id| id.0 >= len) {
                        missing.push(format!("balancer '{}' distributor targets", c.label()));
                    }
                }
                Model::Throttle(t) => {
                    if t.rules().is_empty() {
                        missing.push(format!("throttle '{}' rules", c.label()));
                    }
                    for rule in t.rules() {
                        if !rule.is_wildcard() && !bound(rule.source()) {
                            missing.push(format!(
                                "throttle '{}' rule source '{}'",
                                c.label(),
                                rule.source_label().unwrap_or_default()
                            ));
                        }
                        if rule.next_label().is_some() && !bound(rule.next()) {
                            missing.push(format!("throttle '{}' rule downstream", c.label()));
                        }
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::UnresolvedReference(missing.join("; ")))
        }
    }

    /// 仿真前的总闸：必须已编译且通过校验
    pub fn ensure_runnable(&self) -> Result<()> {
        if !self.compiled {
            let errors = if self.errors.is_empty() {
                vec!["network has not been linked".to_string()]
            } else {
                self.errors.clone()
            };
            return Err(Error::NotCompiled(errors));
        }
        self.validate()
    }

    fn index(&self, id: ComponentId) -> Result<usize> {
        if id.0 < self.components.len() {
            Ok(id.0)
        } else {
            Err(Error::UnresolvedReference(format!("component {id:?}")))
        }
    }

    /// 站点下一次可用的时刻；Balancer 预览其分发器当前选择的下游
    pub fn available(&self, id: ComponentId) -> SimTime {
        let Some(c) = self.components.get(id.0) else {
            return SimTime::ZERO;
        };
        match &c.model {
            Model::Source(s) => s.clock(),
            Model::Processor(p) => p.available(),
            Model::Sink(s) => s.clock(),
            Model::Balancer(b) => b.available(self).unwrap_or(SimTime::ZERO),
            Model::Throttle(t) => t.available(),
        }
    }

    /// 让事件访问一个站点：更新时间戳、写日志、绑定下一个组件
    #[tracing::instrument(skip(self, ev), fields(component = %self.label(id), event_source = ?ev.source, event_label = ev.label))]
    pub fn visit(&mut self, id: ComponentId, ev: &mut Event) -> Result<()> {
        let idx = self.index(id)?;

        if let Model::Balancer(b) = &self.components[idx].model {
            let snapshot = b.admit(ev);
            b.distributor().assign(ev, self)?;
            trace!(target_component = ?ev.component, "⚖️  分发");
            self.components[idx].record(snapshot, Some(0));
            return Ok(());
        }

        let c = &mut self.components[idx];
        let depth = match &mut c.model {
            Model::Source(s) => {
                s.accept(ev);
                None
            }
            Model::Processor(p) => {
                p.simulate(ev);
                None
            }
            Model::Sink(s) => {
                s.simulate(ev);
                None
            }
            Model::Throttle(t) => {
                t.simulate(ev, &c.label)?;
                // 闸门日志的 completed 单调不减，从尾部数仍在途的事件即可
                let arrived = ev.arrived;
                Some(
                    c.log
                        .iter()
                        .rev()
                        .take_while(|e| e.completed > arrived)
                        .count() as u64,
                )
            }
            Model::Balancer(_) => unreachable!("balancer visits return above"),
        };
        c.record(ev.snapshot(), depth);
        trace!(
            arrived = %ev.arrived,
            started = %ev.started,
            completed = %ev.completed,
            next = ?ev.component,
            "访问完成"
        );
        Ok(())
    }

    /// 由 Source 产生下一个到达；超出 `horizon` 时返回 `None`
    pub fn generate(&mut self, source: ComponentId, horizon: Option<SimTime>) -> Result<Option<Event>> {
        let idx = self.index(source)?;
        let c = &mut self.components[idx];
        let Model::Source(s) = &mut c.model else {
            return Err(Error::UnresolvedReference(format!(
                "'{}' is not a source",
                c.label
            )));
        };
        let Some(ev) = s.generate(source, horizon) else {
            return Ok(None);
        };
        c.record(ev.snapshot(), None);
        Ok(Some(ev))
    }

    /// 把外部构造的事件原样交给 Source，返回绑定了下游的事件
    pub fn inject(&mut self, source: ComponentId, mut ev: Event) -> Result<Event> {
        let idx = self.index(source)?;
        if self.components[idx].kind() != ComponentKind::Source {
            return Err(Error::UnresolvedReference(format!(
                "'{}' is not a source",
                self.components[idx].label()
            )));
        }
        self.visit(source, &mut ev)?;
        Ok(ev)
    }

    /// 优先级发现遍历的分派点。
    ///
    /// 探索阶段先看已有结论：已在路径上则提升全部待定参与者，
    /// 已被排除则把待定参与者一并排除。
    pub(crate) fn prioritize(&self, id: ComponentId, seq: &mut Sequencer, exploring: bool) {
        let Some(c) = self.components.get(id.0) else {
            if exploring {
                seq.exclude(None);
            }
            return;
        };
        if exploring {
            if seq.is_path(id) {
                seq.promote();
                return;
            }
            if seq.is_excluded(id) {
                seq.exclude(None);
                return;
            }
        }
        match &c.model {
            // Source 不能作为下游，事件也从不停留在 Source 上，
            // 正常遍历不会到达这里；直接调用时视为分支外的终点
            Model::Source(_) => {
                if exploring {
                    seq.exclude(Some(id));
                }
            }
            Model::Processor(p) => p.prioritize(id, seq, exploring),
            Model::Sink(s) => s.prioritize(id, seq, exploring),
            Model::Balancer(b) => b.prioritize(id, seq, exploring, self),
            Model::Throttle(t) => t.prioritize(id, seq, exploring),
        }
    }

    /// 重置 `root` 及其所有可达下游，每个站点恰好一次；返回被重置的站点数
    pub fn reset_from(&mut self, root: ComponentId) -> usize {
        self.reset_reachable(vec![root])
    }

    /// 从全部入口重置
    pub fn reset(&mut self) -> usize {
        let roots = if self.entry_points.is_empty() {
            (0..self.components.len()).map(ComponentId).collect()
        } else {
            self.entry_points.clone()
        };
        self.reset_reachable(roots)
    }

    fn reset_reachable(&mut self, mut stack: Vec<ComponentId>) -> usize {
        let mut visited = HashSet::new();
        while let Some(id) = stack.pop() {
            if id.0 >= self.components.len() || !visited.insert(id) {
                continue;
            }
            let c = &mut self.components[id.0];
            stack.extend(c.model().downstream());
            c.reset();
        }
        debug!(reset = visited.len(), "🔄 重置完成");
        visited.len()
    }
}

fn resolve(
    owner: &str,
    target: &str,
    labels: &HashMap<String, ComponentId>,
    kinds: &[ComponentKind],
    errors: &mut Vec<String>,
) -> Option<ComponentId> {
    let Some(&id) = labels.get(target) else {
        errors.push(format!("'{owner}' references undefined component '{target}'"));
        return None;
    };
    if kinds[id.0] == ComponentKind::Source {
        errors.push(format!(
            "'{owner}' targets source '{target}', which cannot be a downstream component"
        ));
        return None;
    }
    Some(id)
}

fn link_throttle(
    owner: &str,
    t: &mut Throttle,
    labels: &HashMap<String, ComponentId>,
    kinds: &[ComponentKind],
    errors: &mut Vec<String>,
) {
    if t.rules().is_empty() {
        errors.push(format!("throttle '{owner}' has no rules"));
    }
    let wildcards = t.rules().iter().filter(|r| r.is_wildcard()).count();
    if wildcards > 1 {
        errors.push(format!("throttle '{owner}' declares {wildcards} wildcard rules"));
    }
    let mut seen = HashSet::new();
    for rule in t.rules_mut() {
        if let Some(src) = rule.source_label().map(str::to_string) {
            match labels.get(&src) {
                Some(&id) if kinds[id.0] == ComponentKind::Source => {
                    if !seen.insert(id) {
                        errors.push(format!("throttle '{owner}' repeats a rule for '{src}'"));
                    }
                    rule.set_source(id);
                }
                Some(_) => errors.push(format!(
                    "throttle '{owner}' rule names '{src}', which is not a source"
                )),
                None => errors.push(format!(
                    "throttle '{owner}' rule names undefined source '{src}'"
                )),
            }
        }
        if let Some(next) = rule.next_label().map(str::to_string)
            && let Some(id) = resolve(owner, &next, labels, kinds, errors)
        {
            rule.set_next(id);
        }
    }
    t.index_rules();
}
