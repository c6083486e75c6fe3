//! Random-sample effects: additive noise and scratch.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::rng::uniform_noise;

/// Adds `uniform[0, 1) * volume[i] * peak` to every sample.
pub fn inject_noise(buffer: Vec<f64>, volume: &[f64], peak: f64, rng: &mut Pcg32) -> Vec<f64> {
    let noise = uniform_noise(rng, buffer.len());
    buffer
        .into_iter()
        .zip(noise)
        .zip(volume)
        .map(|((sample, n), v)| sample + n * v * peak)
        .collect()
}

/// Replaces each sample, with probability `probability[i]`, by
/// `uniform[0, 1) * peak`.
///
/// The replacement mask is drawn for the whole buffer before the noise.
pub fn scratch(buffer: Vec<f64>, probability: &[f64], peak: f64, rng: &mut Pcg32) -> Vec<f64> {
    let mask: Vec<bool> = probability
        .iter()
        .take(buffer.len())
        .map(|&p| rng.gen::<f64>() < p)
        .collect();
    let noise = uniform_noise(rng, buffer.len());
    buffer
        .into_iter()
        .zip(mask)
        .zip(noise)
        .map(|((sample, hit), n)| if hit { n * peak } else { sample })
        .collect()
}
