//! Buffer processing helpers for normalization, placement, and clipping.

use crate::config::Quantization;

/// Largest absolute value in `samples` (0 for an empty buffer).
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max)
}

/// Rescales `samples` so the peak lands exactly on `target`.
///
/// An all-zero buffer is left untouched. Returns whether anything was scaled.
pub fn normalize_to(samples: &mut [f64], target: f64) -> bool {
    let current_peak = peak(samples);
    if current_peak > 0.0 && current_peak.is_finite() {
        for sample in samples.iter_mut() {
            *sample = *sample / current_peak * target;
        }
        true
    } else {
        false
    }
}

/// Converts float samples to `i16` with the given rounding mode.
pub fn quantize_buffer(samples: &[f64], quantization: Quantization) -> Vec<i16> {
    samples.iter().map(|&s| quantization.quantize(s)).collect()
}

/// Adds `voice` into `buffer` starting at `offset`, dropping whatever falls
/// past the end.
pub fn add_at(buffer: &mut [i32], offset: usize, voice: &[i16]) {
    if offset >= buffer.len() {
        return;
    }
    for (acc, &sample) in buffer[offset..].iter_mut().zip(voice) {
        *acc += sample as i32;
    }
}

/// Clamps `buffer` to `[-limit, limit]`, returning how many samples changed.
pub fn clip(buffer: &mut [i32], limit: i32) -> usize {
    let mut clipped = 0;
    for sample in buffer.iter_mut() {
        let bounded = (*sample).clamp(-limit, limit);
        if bounded != *sample {
            *sample = bounded;
            clipped += 1;
        }
    }
    clipped
}
