//! 仿真核心模块
//!
//! 此模块包含逻辑时间、事件记录、待执行缓冲区、优先级前瞻与调度器。

// 子模块声明
mod event;
mod pending;
mod scheduler;
mod sequencer;
mod spec;
mod time;

// 重新导出公共接口
pub use event::Event;
pub use pending::PendingBuffer;
pub use scheduler::{RunSummary, Scheduler};
pub use sequencer::Sequencer;
pub use spec::{ComponentSpec, GeneratorSpec, NetworkSpec, RuleSpec, derive_seed};
pub use time::SimTime;
