//! FFT-mask low-pass filter with a resonant bump.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{SynthError, SynthResult};

/// Resolved low-pass parameters, all in Hz except `resonance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    pub cutoff: f64,
    pub resonance: f64,
    pub cutout_width: f64,
    pub resonance_width: f64,
}

impl LowPassFilter {
    /// Gain for FFT bin `bin` of a buffer spanning `length` seconds.
    ///
    /// Piecewise linear through `(cutoff - resonance_width, 1)`,
    /// `(cutoff, 1 + resonance)` and `(cutoff + cutout_width, 0)`, held flat
    /// outside that range.
    pub fn gain(&self, bin: f64, length: f64) -> f64 {
        let xp = [
            length * (self.cutoff - self.resonance_width),
            length * self.cutoff,
            length * (self.cutoff + self.cutout_width),
        ];
        let fp = [1.0, 1.0 + self.resonance, 0.0];
        interp(bin, &xp, &fp)
    }

    /// Filters `buffer`, which spans `length` seconds.
    ///
    /// The mask is indexed by raw bin number, so mirrored bins above the
    /// cutout are zeroed as well and the pass band comes back at half
    /// amplitude. The owning playable's normalization restores the level.
    pub fn apply(&self, buffer: &[f64], length: f64) -> SynthResult<Vec<f64>> {
        if buffer.is_empty() {
            return Err(SynthError::effect(
                "low_pass_filter",
                "cannot filter an empty buffer",
            ));
        }
        if !self.cutoff.is_finite() || !self.resonance.is_finite() {
            return Err(SynthError::effect(
                "low_pass_filter",
                format!(
                    "cutoff and resonance must be finite, got {} and {}",
                    self.cutoff, self.resonance
                ),
            ));
        }

        let n = buffer.len();
        let mut spectrum: Vec<Complex<f64>> =
            buffer.iter().map(|&s| Complex::new(s, 0.0)).collect();

        let mut planner = FftPlanner::new();
        planner.plan_fft_forward(n).process(&mut spectrum);

        for (k, bin) in spectrum.iter_mut().enumerate() {
            *bin *= self.gain(k as f64, length);
        }

        planner.plan_fft_inverse(n).process(&mut spectrum);

        Ok(spectrum.iter().map(|c| c.re / n as f64).collect())
    }
}

/// Piecewise-linear interpolation, clamped to the end values.
fn interp(x: f64, xp: &[f64; 3], fp: &[f64; 3]) -> f64 {
    if x <= xp[0] {
        return fp[0];
    }
    for i in 0..2 {
        if x <= xp[i + 1] {
            let span = xp[i + 1] - xp[i];
            if span <= 0.0 {
                return fp[i + 1];
            }
            return fp[i] + (fp[i + 1] - fp[i]) * (x - xp[i]) / span;
        }
    }
    fp[2]
}
