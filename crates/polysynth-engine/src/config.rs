//! Engine configuration passed explicitly to every render call.

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Default output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Default integer peak every rendered playable is normalized to.
pub const MAX_AMPLITUDE: i16 = 4096;

/// How float samples are converted to integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantization {
    /// Truncate toward zero.
    #[default]
    Truncate,
    /// Round to the nearest integer.
    Round,
}

impl Quantization {
    /// Converts a float sample to i16, saturating at the type bounds.
    #[inline]
    pub fn quantize(self, sample: f64) -> i16 {
        let value = match self {
            Quantization::Truncate => sample.trunc(),
            Quantization::Round => sample.round(),
        };
        // `as` saturates for out-of-range floats and maps NaN to 0.
        value as i16
    }
}

/// When the mix buffer is clipped to `[-max_amplitude, max_amplitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipMode {
    /// Accumulate every voice, then clip the sum once.
    #[default]
    ClipOnce,
    /// Clip after each voice is added (order dependent).
    ClipEachStep,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Integer peak amplitude of a normalized playable.
    pub max_amplitude: i16,
    /// Float to PCM conversion.
    pub quantization: Quantization,
    /// Mix clipping policy.
    pub clipping: ClipMode,
    /// Render independent voices on the rayon thread pool.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            max_amplitude: MAX_AMPLITUDE,
            quantization: Quantization::Truncate,
            clipping: ClipMode::ClipOnce,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Rejects settings no render can use.
    pub fn validate(&self) -> SynthResult<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::invalid_param("sample_rate", "must be positive"));
        }
        if self.max_amplitude <= 0 {
            return Err(SynthError::invalid_param(
                "max_amplitude",
                format!("must be positive, got {}", self.max_amplitude),
            ));
        }
        Ok(())
    }

    /// Sample rate as f64.
    pub fn rate(&self) -> f64 {
        self.sample_rate as f64
    }

    /// Max amplitude as f64.
    pub fn peak(&self) -> f64 {
        self.max_amplitude as f64
    }

    /// Number of samples covering `seconds`.
    pub fn samples_for(&self, seconds: f64) -> usize {
        (seconds * self.rate()).round().max(0.0) as usize
    }

    /// Builds the time axis `[0, length)` in seconds, one entry per sample.
    pub fn time_axis(&self, length: f64) -> Vec<f64> {
        let rate = self.rate();
        (0..self.samples_for(length))
            .map(|i| i as f64 / rate)
            .collect()
    }
}
