//! Duration-preserving pitch shift.
//!
//! The buffer is time-stretched by the pitch ratio with a phase vocoder, then
//! resampled back to its original length, which moves every partial by the
//! same ratio without changing the timing.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{SynthError, SynthResult};
use crate::tone::semitones_to_ratio;

/// Analysis/synthesis frame length.
const FFT_SIZE: usize = 2048;

/// Synthesis hop (75% overlap).
const HOP_SIZE: usize = 512;

/// Shifts `buffer` by `semitones`, returning a buffer of the same length.
pub fn pitch_shift(buffer: &[f64], semitones: f64) -> SynthResult<Vec<f64>> {
    if buffer.is_empty() {
        return Err(SynthError::effect(
            "transpose",
            "cannot pitch-shift an empty buffer",
        ));
    }
    if !semitones.is_finite() {
        return Err(SynthError::effect(
            "transpose",
            format!("interval must be finite, got {semitones}"),
        ));
    }
    if semitones == 0.0 {
        return Ok(buffer.to_vec());
    }

    let ratio = semitones_to_ratio(semitones);
    let stretched = time_stretch(buffer, ratio);

    // Input sample j sits at FFT_SIZE + j in the padded timeline and lands at
    // ratio * (FFT_SIZE + j) once stretched.
    let shifted = (0..buffer.len())
        .map(|i| sample_linear(&stretched, ratio * (FFT_SIZE + i) as f64))
        .collect();
    Ok(shifted)
}

/// Phase-vocoder time stretch of `buffer`, zero-padded by `FFT_SIZE` on both
/// sides. The output covers the padded input scaled by `ratio`.
fn time_stretch(buffer: &[f64], ratio: f64) -> Vec<f64> {
    let mut padded = vec![0.0; FFT_SIZE];
    padded.extend_from_slice(buffer);
    padded.resize(padded.len() + FFT_SIZE, 0.0);

    let window: Vec<f64> = (0..FFT_SIZE).map(|i| hann_window(i, FFT_SIZE)).collect();
    // Hann squared at 75% overlap sums to a constant.
    let window_gain = window.iter().map(|w| w * w).sum::<f64>() / HOP_SIZE as f64;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(FFT_SIZE);
    let ifft = planner.plan_fft_inverse(FFT_SIZE);

    let analysis_hop = HOP_SIZE as f64 / ratio;
    let mut frame_positions = Vec::new();
    let mut m = 0usize;
    loop {
        let position = (m as f64 * analysis_hop).round() as usize;
        if position + FFT_SIZE > padded.len() {
            break;
        }
        frame_positions.push(position);
        m += 1;
    }

    let output_len = frame_positions.len().saturating_sub(1) * HOP_SIZE + FFT_SIZE;
    let mut output = vec![0.0; output_len];

    let mut previous_phase = vec![0.0; FFT_SIZE];
    let mut synthesis_phase = vec![0.0; FFT_SIZE];
    let mut spectrum = vec![Complex::new(0.0, 0.0); FFT_SIZE];

    for (frame, &position) in frame_positions.iter().enumerate() {
        for (i, bin) in spectrum.iter_mut().enumerate() {
            *bin = Complex::new(padded[position + i] * window[i], 0.0);
        }
        fft.process(&mut spectrum);

        let hop = if frame == 0 {
            0.0
        } else {
            (position - frame_positions[frame - 1]) as f64
        };

        for (k, bin) in spectrum.iter_mut().enumerate() {
            let magnitude = bin.norm();
            let phase = bin.arg();

            if frame == 0 || hop == 0.0 {
                synthesis_phase[k] = phase;
            } else {
                let omega = 2.0 * PI * k as f64 / FFT_SIZE as f64;
                let deviation = wrap_phase(phase - previous_phase[k] - omega * hop);
                let instantaneous = omega + deviation / hop;
                synthesis_phase[k] += instantaneous * HOP_SIZE as f64;
            }
            previous_phase[k] = phase;
            *bin = Complex::from_polar(magnitude, synthesis_phase[k]);
        }

        ifft.process(&mut spectrum);

        let offset = frame * HOP_SIZE;
        for (i, bin) in spectrum.iter().enumerate() {
            let sample = bin.re / FFT_SIZE as f64;
            output[offset + i] += sample * window[i] / window_gain;
        }
    }

    output
}

/// Linear interpolation into `buffer`; zero outside it.
fn sample_linear(buffer: &[f64], position: f64) -> f64 {
    if position < 0.0 {
        return 0.0;
    }
    let index = position.floor() as usize;
    let frac = position - index as f64;
    match (buffer.get(index), buffer.get(index + 1)) {
        (Some(&a), Some(&b)) => a + (b - a) * frac,
        (Some(&a), None) => a * (1.0 - frac),
        _ => 0.0,
    }
}

#[inline]
fn wrap_phase(phase: f64) -> f64 {
    phase - 2.0 * PI * ((phase + PI) / (2.0 * PI)).floor()
}

#[inline]
fn hann_window(i: usize, size: usize) -> f64 {
    0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos())
}
