//! Envelope-free sources: bare oscillator and noise.

use rand_pcg::Pcg32;

use super::RenderRaw;
use crate::config::RenderConfig;
use crate::oscillator::Waveform;
use crate::rng::uniform_noise;

/// A waveform at a fixed frequency, without envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayableOscillator {
    pub waveform: Waveform,
    pub frequency: f64,
}

impl PlayableOscillator {
    pub fn new(waveform: Waveform, frequency: f64) -> Self {
        Self {
            waveform,
            frequency,
        }
    }
}

impl RenderRaw for PlayableOscillator {
    fn render_raw(&self, time: &[f64], config: &RenderConfig, _rng: &mut Pcg32) -> Vec<f64> {
        let peak = config.peak();
        self.waveform
            .render(time, self.frequency)
            .into_iter()
            .map(|v| v * peak)
            .collect()
    }
}

/// Uniform `[0, max_amplitude)` noise.
pub(super) fn render_noise(time: &[f64], config: &RenderConfig, rng: &mut Pcg32) -> Vec<f64> {
    let peak = config.peak();
    uniform_noise(rng, time.len())
        .into_iter()
        .map(|v| v * peak)
        .collect()
}
