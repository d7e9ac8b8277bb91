//! 仿真时间类型
//!
//! 逻辑时间，单位由定义文件自行约定（通常为秒）。时间只是数据，与墙钟无关。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// 仿真时间（也用于表示时长）。
///
/// 比较使用 `f64::total_cmp`，因此可以作为有序容器的键。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// 把任意数值收敛为合法时长：NaN、负数与 -0.0 视为 0。
    pub fn duration(v: f64) -> SimTime {
        if v.is_nan() || v <= 0.0 {
            SimTime::ZERO
        } else {
            SimTime(v)
        }
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// 差值，结果不小于 0
    pub fn saturating_sub(self, rhs: SimTime) -> SimTime {
        SimTime::duration(self.0 - rhs.0)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl AddAssign for SimTime {
    fn add_assign(&mut self, rhs: SimTime) {
        self.0 += rhs.0;
    }
}

impl Sub for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 - rhs.0)
    }
}

impl From<f64> for SimTime {
    fn from(v: f64) -> Self {
        SimTime(v)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
