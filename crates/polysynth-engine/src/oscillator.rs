//! Pure waveform generators.
//!
//! Every oscillator is a stateless function of absolute time and frequency,
//! `(t, f) -> sample`, so a time-varying frequency (pitch envelope) is applied
//! by evaluating with `f(t)` directly rather than by integrating phase.
//!
//! Triangle and sawtooth are not zero-centered: triangle spans `[0, 1]` and
//! sawtooth spans `[0, 1)`. Renders depend on these exact shapes.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Waveform shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// `sin(2π·f·t)`.
    #[default]
    Sine,
    /// `(-1)^floor(f·t)`.
    Square,
    /// `2·|f·t − floor(f·t + 0.5)|`.
    Triangle,
    /// `(f·t) mod 1`.
    Sawtooth,
    /// `2·(((f·t/2) mod 1) < width) − 1`.
    Pulse {
        /// Fraction of the (doubled) period spent high.
        width: f64,
    },
}

impl Waveform {
    /// Evaluates the waveform at time `t` for frequency `frequency`.
    #[inline]
    pub fn sample(&self, t: f64, frequency: f64) -> f64 {
        let x = t * frequency;
        match self {
            Waveform::Sine => (TAU * x).sin(),
            Waveform::Square => {
                if (x.floor() as i64).rem_euclid(2) == 0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 2.0 * (x - (x + 0.5).floor()).abs(),
            Waveform::Sawtooth => x.rem_euclid(1.0),
            Waveform::Pulse { width } => {
                if (x / 2.0).rem_euclid(1.0) < *width {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }

    /// Evaluates the waveform at a fixed frequency over a time axis.
    pub fn render(&self, time: &[f64], frequency: f64) -> Vec<f64> {
        time.iter().map(|&t| self.sample(t, frequency)).collect()
    }

    /// Evaluates the waveform with a per-sample frequency.
    ///
    /// `frequencies` must have the same length as `time`.
    pub fn render_modulated(&self, time: &[f64], frequencies: &[f64]) -> Vec<f64> {
        debug_assert_eq!(time.len(), frequencies.len());
        time.iter()
            .zip(frequencies)
            .map(|(&t, &f)| self.sample(t, f))
            .collect()
    }
}
