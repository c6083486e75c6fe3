//! Additive note rendering.

use std::sync::Arc;

use rand_pcg::Pcg32;

use super::RenderRaw;
use crate::config::RenderConfig;
use crate::timbre::Timbre;
use crate::tone::Tone;

/// A tone played with a timbre for `raw_length` seconds (release excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub tone: Tone,
    pub timbre: Arc<Timbre>,
    pub raw_length: f64,
}

impl Note {
    pub fn new(tone: Tone, timbre: Arc<Timbre>, raw_length: f64) -> Self {
        Self {
            tone,
            timbre,
            raw_length,
        }
    }
}

impl RenderRaw for Note {
    fn render_raw(&self, time: &[f64], _config: &RenderConfig, _rng: &mut Pcg32) -> Vec<f64> {
        let fundamental = self.tone.frequency();
        let pitch_ratio = self.timbre.pitch_ratio(time, self.raw_length);

        let mut signal = vec![0.0; time.len()];
        for harmonic in &self.timbre.harmonics {
            let base = harmonic.relative_frequency * fundamental;
            let partial = match &pitch_ratio {
                Some(ratio) => {
                    let frequencies: Vec<f64> = ratio.iter().map(|r| base * r).collect();
                    harmonic.oscillator.render_modulated(time, &frequencies)
                }
                None => harmonic.oscillator.render(time, base),
            };
            for (acc, value) in signal.iter_mut().zip(partial) {
                *acc += harmonic.relative_amplitude * value;
            }
        }

        let gain = self.timbre.amplitude_envelope.get(time, self.raw_length);
        for (sample, g) in signal.iter_mut().zip(gain) {
            *sample *= g;
        }
        signal
    }
}
