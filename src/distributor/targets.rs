//! 分发器的下游槽位
//!
//! 构造时只有声明的标签；链接阶段按标签把组件句柄填入对应槽位。

use crate::component::ComponentId;

#[derive(Debug, Clone, Default)]
pub struct Targets {
    labels: Vec<String>,
    bound: Vec<Option<ComponentId>>,
}

impl Targets {
    pub fn new(labels: Vec<String>) -> Self {
        let bound = vec![None; labels.len()];
        Self { labels, bound }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// 绑定所有同名槽位；没有匹配的槽位返回 false
    pub fn bind(&mut self, label: &str, id: ComponentId) -> bool {
        let mut hit = false;
        for (slot, l) in self.bound.iter_mut().zip(&self.labels) {
            if l == label {
                *slot = Some(id);
                hit = true;
            }
        }
        hit
    }

    pub fn get(&self, idx: usize) -> Option<ComponentId> {
        self.bound.get(idx).copied().flatten()
    }

    pub fn connections(&self) -> Vec<ComponentId> {
        self.bound.iter().flatten().copied().collect()
    }

    pub fn is_bound(&self) -> bool {
        !self.bound.is_empty() && self.bound.iter().all(Option::is_some)
    }
}
