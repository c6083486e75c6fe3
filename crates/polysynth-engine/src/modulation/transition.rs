//! Linear transition between two time/value pairs.

use serde::{Deserialize, Serialize};

/// Holds `start_value` until `start_time`, ramps linearly to `end_value` at
/// `end_time`, then holds `end_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTransition {
    pub start_time: f64,
    pub start_value: f64,
    pub end_time: f64,
    pub end_value: f64,
}

impl LinearTransition {
    pub fn new(start_time: f64, start_value: f64, end_time: f64, end_value: f64) -> Self {
        Self {
            start_time,
            start_value,
            end_time,
            end_value,
        }
    }

    /// Interpolated value at `t`.
    ///
    /// When `end_time <= start_time` the transition is a step at `start_time`.
    pub fn value_at(&self, t: f64) -> f64 {
        if t <= self.start_time {
            if self.end_time <= self.start_time && t == self.start_time {
                return self.end_value;
            }
            return self.start_value;
        }
        if t >= self.end_time {
            return self.end_value;
        }
        let progress = (t - self.start_time) / (self.end_time - self.start_time);
        self.start_value + (self.end_value - self.start_value) * progress
    }
}
