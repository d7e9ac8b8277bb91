//! 站点网络模块
//!
//! 包含站点模型（Source、Processor、Sink、Balancer、Throttle）
//! 以及持有它们的注册表 `Network`。

// 子模块声明
mod balancer;
mod build;
mod id;
mod network;
mod processor;
mod sink;
mod source;
mod station;
mod throttle;

// 重新导出公共接口
pub use balancer::Balancer;
pub use id::ComponentId;
pub use network::Network;
pub use processor::Processor;
pub use sink::Sink;
pub use source::Source;
pub use station::{Component, ComponentKind, Model};
pub use throttle::Throttle;
