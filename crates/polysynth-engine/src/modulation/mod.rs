//! Time-varying effect parameters.
//!
//! Any effect parameter is a [`Value`]: either a constant or a [`Modulator`]
//! sampled over the time axis the effect receives. Resolution happens once
//! per render call.

pub mod lfo;
pub mod transition;


use serde::{Deserialize, Serialize};

pub use lfo::Lfo;
pub use transition::LinearTransition;

/// A time-varying value source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modulator {
    /// Periodic oscillation around a center value.
    Lfo(Lfo),
    /// Linear ramp between two time/value pairs.
    LinearTransition(LinearTransition),
}

impl Modulator {
    /// Value at a single instant.
    pub fn value_at(&self, t: f64) -> f64 {
        match self {
            Modulator::Lfo(lfo) => lfo.value_at(t),
            Modulator::LinearTransition(transition) => transition.value_at(t),
        }
    }

    /// Values for every instant of `time`.
    pub fn get_value(&self, time: &[f64]) -> Vec<f64> {
        time.iter().map(|&t| self.value_at(t)).collect()
    }
}

/// An effect parameter: constant or modulated.
///
/// Deserializes from a bare number or from a modulator object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Same value at every instant.
    Constant(f64),
    /// Sampled from a modulator.
    Modulated(Modulator),
}

impl Value {
    /// Samples the value over `time`.
    pub fn resolve(&self, time: &[f64]) -> Vec<f64> {
        match self {
            Value::Constant(v) => vec![*v; time.len()],
            Value::Modulated(modulator) => modulator.get_value(time),
        }
    }

    /// Reduces the value to one scalar for effects that need a single setting
    /// for the whole buffer: the constant itself, or the modulator's mean over
    /// `time` (its value at 0 when `time` is empty).
    pub fn resolve_scalar(&self, time: &[f64]) -> f64 {
        match self {
            Value::Constant(v) => *v,
            Value::Modulated(modulator) => {
                if time.is_empty() {
                    modulator.value_at(0.0)
                } else {
                    modulator.get_value(time).iter().sum::<f64>() / time.len() as f64
                }
            }
        }
    }

    /// Returns the constant, if this value is one.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Value::Constant(v) => Some(*v),
            Value::Modulated(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Constant(value)
    }
}

impl From<Modulator> for Value {
    fn from(modulator: Modulator) -> Self {
        Value::Modulated(modulator)
    }
}

impl From<Lfo> for Value {
    fn from(lfo: Lfo) -> Self {
        Value::Modulated(Modulator::Lfo(lfo))
    }
}

impl From<LinearTransition> for Value {
    fn from(transition: LinearTransition) -> Self {
        Value::Modulated(Modulator::LinearTransition(transition))
    }
}
