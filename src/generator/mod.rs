//! 数值生成器
//!
//! 生成器为 Source（到达间隔）、Processor（服务时长）与 Throttle（冷却时长）
//! 提供非负时长。随机生成器的 RNG 在构造时注入种子，`reset()` 重新播种，
//! 因此同一网络重复运行结果一致。

mod binding;
mod constant;
mod gaussian;
mod skewed;
mod uniform;

pub use binding::Binding;
pub use constant::Constant;
pub use gaussian::Gaussian;
pub use skewed::Skewed;
pub use uniform::Uniform;

use crate::sim::SimTime;

/// 时长生成器
pub trait Generator: std::fmt::Debug {
    /// 生成下一个非负时长
    fn generate(&mut self) -> SimTime;

    /// 人类可读的分布描述（用于报告）
    fn characteristics(&self) -> String;

    /// 能否产生正的时长；始终为 0 的生成器驱动的 Source 时钟永远不前进
    fn can_advance(&self) -> bool {
        true
    }

    /// 恢复到构造时的状态（随机生成器重新播种）
    fn reset(&mut self) {}
}
