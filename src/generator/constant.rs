use super::Generator;
use crate::error::{Error, Result};
use crate::sim::SimTime;

/// 恒定时长
#[derive(Debug, Clone)]
pub struct Constant {
    value: SimTime,
}

impl Constant {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Definition(format!(
                "constant generator needs a finite nonnegative value, got {value}"
            )));
        }
        Ok(Self {
            value: SimTime::duration(value),
        })
    }
}

impl Generator for Constant {
    fn generate(&mut self) -> SimTime {
        self.value
    }

    fn characteristics(&self) -> String {
        format!("constant({})", self.value)
    }

    fn can_advance(&self) -> bool {
        self.value > SimTime::ZERO
    }
}
