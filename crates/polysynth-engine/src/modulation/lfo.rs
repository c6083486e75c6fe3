//! LFO (Low Frequency Oscillator) modulator.

use serde::{Deserialize, Serialize};

use crate::oscillator::Waveform;

/// Oscillates `amplitude` around `center` at `frequency` Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lfo {
    /// Rate in Hz.
    pub frequency: f64,
    /// Peak deviation from the center.
    pub amplitude: f64,
    /// Value the oscillation is centered on.
    #[serde(default)]
    pub center: f64,
    /// Shape of the oscillation.
    #[serde(default)]
    pub waveform: Waveform,
}

impl Lfo {
    /// Creates a sine LFO.
    pub fn new(frequency: f64, amplitude: f64, center: f64) -> Self {
        Self {
            frequency,
            amplitude,
            center,
            waveform: Waveform::Sine,
        }
    }

    /// Sets the waveform.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// `amplitude * waveform(t, frequency) + center`.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.amplitude * self.waveform.sample(t, self.frequency) + self.center
    }
}
