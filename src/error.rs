//! 错误类型
//!
//! 仿真核心、定义加载与统计阶段共用的错误。

use thiserror::Error;

use crate::sim::SimTime;

#[derive(Debug, Error)]
pub enum Error {
    /// 链接后仍有未绑定的组件/分发器/生成器引用
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),

    /// 网络定义未通过编译，拒绝仿真
    #[error("network is not compiled: {}", .0.join("; "))]
    NotCompiled(Vec<String>),

    /// 统计窗口内样本不足（空窗口或观测跨度为零）
    #[error("insufficient sample: {0}")]
    InsufficientSample(String),

    /// 采样窗口必须满足 start < end < horizon
    #[error("invalid window [{start:?}, {end:?}) for horizon {horizon:?}")]
    InvalidWindow {
        start: SimTime,
        end: SimTime,
        horizon: SimTime,
    },

    /// 定义内容非法（参数越界等）
    #[error("definition error: {0}")]
    Definition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
