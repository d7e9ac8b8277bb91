//! 网络定义文件（JSON）
//!
//! 定义文件描述站点及其连接；加载后经 `Network::from_spec` 构建并链接。

use serde::{Deserialize, Serialize};

use crate::distributor::Policy;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// 随机生成器与随机分发器的基础种子
    #[serde(default)]
    pub seed: u64,
    pub components: Vec<ComponentSpec>,
}

impl NetworkSpec {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentSpec {
    Source {
        label: String,
        generator: GeneratorSpec,
        next: String,
        #[serde(default)]
        monitor: bool,
    },
    Processor {
        label: String,
        generator: GeneratorSpec,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        monitor: bool,
    },
    Sink {
        label: String,
        #[serde(default)]
        monitor: bool,
    },
    Balancer {
        label: String,
        policy: Policy,
        targets: Vec<String>,
        #[serde(default)]
        monitor: bool,
    },
    Throttle {
        label: String,
        rules: Vec<RuleSpec>,
        #[serde(default)]
        monitor: bool,
    },
}

impl ComponentSpec {
    pub fn label(&self) -> &str {
        match self {
            ComponentSpec::Source { label, .. }
            | ComponentSpec::Processor { label, .. }
            | ComponentSpec::Sink { label, .. }
            | ComponentSpec::Balancer { label, .. }
            | ComponentSpec::Throttle { label, .. } => label,
        }
    }

    pub fn monitor(&self) -> bool {
        match self {
            ComponentSpec::Source { monitor, .. }
            | ComponentSpec::Processor { monitor, .. }
            | ComponentSpec::Sink { monitor, .. }
            | ComponentSpec::Balancer { monitor, .. }
            | ComponentSpec::Throttle { monitor, .. } => *monitor,
        }
    }
}

/// Throttle 规则；`source` 省略或为 `"*"` 表示通配默认规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub source: Option<String>,
    pub cooldown: GeneratorSpec,
    #[serde(default)]
    pub next: Option<String>,
}

impl RuleSpec {
    pub fn is_wildcard(&self) -> bool {
        matches!(self.source.as_deref(), None | Some("*"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorSpec {
    Constant { value: f64 },
    Uniform { min: f64, max: f64 },
    Gaussian { mean: f64, std_dev: f64 },
    Skewed { mean: f64, std_dev: f64 },
}

/// 由基础种子与组件下标派生稳定的子种子（splitmix64）
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut z = (base ^ index.wrapping_mul(0x9E3779B97F4A7C15)).wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
