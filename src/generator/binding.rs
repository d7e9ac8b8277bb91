//! 生成器绑定
//!
//! Source 与 Throttle 上的生成器除了产生时长，还带有
//! - 作用的来源（Throttle 的按来源规则；`None` 表示通配默认规则）
//! - 下游组件标签，以及链接阶段解析出的下游句柄

use super::Generator;
use crate::component::ComponentId;
use crate::sim::SimTime;

#[derive(Debug)]
pub struct Binding {
    source_label: Option<String>,
    source: Option<ComponentId>,
    generator: Box<dyn Generator>,
    next_label: Option<String>,
    next: Option<ComponentId>,
}

impl Binding {
    pub fn new(generator: Box<dyn Generator>, next_label: Option<String>) -> Self {
        Self {
            source_label: None,
            source: None,
            generator,
            next_label,
            next: None,
        }
    }

    /// 仅作用于某个来源的绑定（Throttle 规则）
    pub fn for_source(
        source_label: impl Into<String>,
        generator: Box<dyn Generator>,
        next_label: Option<String>,
    ) -> Self {
        Self {
            source_label: Some(source_label.into()),
            ..Self::new(generator, next_label)
        }
    }

    pub fn generate(&mut self) -> SimTime {
        self.generator.generate()
    }

    pub fn characteristics(&self) -> String {
        self.generator.characteristics()
    }

    pub fn can_advance(&self) -> bool {
        self.generator.can_advance()
    }

    pub fn source_label(&self) -> Option<&str> {
        self.source_label.as_deref()
    }

    pub fn source(&self) -> Option<ComponentId> {
        self.source
    }

    pub fn is_wildcard(&self) -> bool {
        self.source_label.is_none()
    }

    pub fn next_label(&self) -> Option<&str> {
        self.next_label.as_deref()
    }

    pub fn next(&self) -> Option<ComponentId> {
        self.next
    }

    pub(crate) fn set_source(&mut self, id: ComponentId) {
        self.source = Some(id);
    }

    pub(crate) fn set_next(&mut self, id: ComponentId) {
        self.next = Some(id);
    }

    /// 没有下游标签的绑定视为已解析（终点在此处离开网络）
    pub fn is_resolved(&self) -> bool {
        self.next_label.is_none() || self.next.is_some()
    }

    pub fn reset(&mut self) {
        self.generator.reset();
    }
}
