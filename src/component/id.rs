//! 组件标识符
//!
//! 事件通过它引用下一个要访问的站点，而不是持有指针。

use serde::{Deserialize, Serialize};

/// 组件在 `Network` 注册表中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub usize);
