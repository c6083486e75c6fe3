//! Renderable units.
//!
//! A [`Playable`] carries the fields every voice shares (placement, volume,
//! effect chain) and a [`Source`] variant that produces the raw signal. The
//! `generate` contract is the same for every source:
//!
//! 1. Run each effect's parameter check.
//! 2. Build the time axis `[0, length)` at the configured sample rate.
//! 3. Render the raw float signal.
//! 4. Apply the effect chain in declared order.
//! 5. Normalize the peak to `volume * max_amplitude` and quantize to `i16`.

mod note;
mod sample;
mod sources;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use rand_pcg::Pcg32;

use crate::config::RenderConfig;
use crate::effects::{apply_effect_chain, preprocess_chain, Effect, EffectContext};
use crate::error::{SynthError, SynthResult};
use crate::mixer::{normalize_to, quantize_buffer};
use crate::oscillator::Waveform;
use crate::timbre::Timbre;
use crate::tone::Tone;

pub use note::Note;
pub use sample::{Sample, SampleOptions};
pub use sources::PlayableOscillator;

/// Produces a raw, unnormalized signal over a local time axis.
pub trait RenderRaw {
    /// Renders one value per entry of `time`.
    fn render_raw(&self, time: &[f64], config: &RenderConfig, rng: &mut Pcg32) -> Vec<f64>;
}

/// Signal source of a playable.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Additive note from a tone and timbre.
    Note(Note),
    /// Bare waveform, no envelope.
    Oscillator(PlayableOscillator),
    /// Loaded PCM clip.
    Sample(Sample),
    /// Uniform random signal.
    Noise,
    /// Zeros.
    Silence,
}

impl Source {
    /// Variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Note(_) => "note",
            Source::Oscillator(_) => "oscillator",
            Source::Sample(_) => "sample",
            Source::Noise => "noise",
            Source::Silence => "silence",
        }
    }
}

impl RenderRaw for Source {
    fn render_raw(&self, time: &[f64], config: &RenderConfig, rng: &mut Pcg32) -> Vec<f64> {
        match self {
            Source::Note(note) => note.render_raw(time, config, rng),
            Source::Oscillator(osc) => osc.render_raw(time, config, rng),
            Source::Sample(sample) => sample.render_raw(time, config, rng),
            Source::Noise => sources::render_noise(time, config, rng),
            Source::Silence => vec![0.0; time.len()],
        }
    }
}

/// A voice placed on the song timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Playable {
    /// Onset in seconds.
    pub start: f64,
    /// Rendered duration in seconds.
    pub length: f64,
    /// Peak gain relative to the max amplitude.
    pub volume: f64,
    /// Post-processing applied before normalization.
    pub effects: Vec<Effect>,
    /// What produces the signal.
    pub source: Source,
}

impl Playable {
    fn with_source(source: Source, start: f64, length: f64) -> Self {
        Self {
            start,
            length,
            volume: 1.0,
            effects: Vec::new(),
            source,
        }
    }

    /// A note held for `raw_length` seconds.
    ///
    /// The playable's length includes the amplitude envelope's release tail.
    pub fn note(tone: Tone, timbre: Arc<Timbre>, start: f64, raw_length: f64) -> Self {
        let length = raw_length + timbre.amplitude_envelope.effective_release();
        Self::with_source(
            Source::Note(Note::new(tone, timbre, raw_length)),
            start,
            length,
        )
    }

    /// A bare waveform at a fixed frequency.
    pub fn oscillator(waveform: Waveform, frequency: f64, start: f64, length: f64) -> Self {
        Self::with_source(
            Source::Oscillator(PlayableOscillator::new(waveform, frequency)),
            start,
            length,
        )
    }

    /// A loaded clip, lasting as long as its data.
    pub fn sample(sample: Sample, start: f64) -> Self {
        let length = sample.duration();
        Self::with_source(Source::Sample(sample), start, length)
    }

    /// Uniform noise.
    pub fn noise(start: f64, length: f64) -> Self {
        Self::with_source(Source::Noise, start, length)
    }

    /// Silence.
    pub fn silence(start: f64, length: f64) -> Self {
        Self::with_source(Source::Silence, start, length)
    }

    /// Sets the volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Overrides the length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Appends one effect to the chain.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Appends effects to the chain.
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// `start + length`.
    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    /// Rejects placements that cannot be rendered.
    pub fn validate(&self) -> SynthResult<()> {
        if !self.start.is_finite() || self.start < 0.0 {
            return Err(SynthError::invalid_param(
                "start",
                format!("must be a non-negative number, got {}", self.start),
            ));
        }
        if !self.length.is_finite() || self.length < 0.0 {
            return Err(SynthError::invalid_param(
                "length",
                format!("must be a non-negative number, got {}", self.length),
            ));
        }
        if !self.volume.is_finite() {
            return Err(SynthError::invalid_param(
                "volume",
                format!("must be finite, got {}", self.volume),
            ));
        }
        Ok(())
    }

    /// Renders the final float signal, before normalization.
    pub fn render(&self, config: &RenderConfig, rng: &mut Pcg32) -> SynthResult<Vec<f64>> {
        config.validate()?;
        self.validate()?;
        preprocess_chain(&self.effects)?;

        let time = config.time_axis(self.length);
        let raw = self.source.render_raw(&time, config, rng);

        let mut ctx = EffectContext {
            config,
            length: self.length,
            volume: self.volume,
            rng,
        };
        apply_effect_chain(&time, raw, &self.effects, &mut ctx)
    }

    /// Renders, normalizes and quantizes this playable.
    pub fn generate(&self, config: &RenderConfig, rng: &mut Pcg32) -> SynthResult<Vec<i16>> {
        let mut buffer = self.render(config, rng)?;
        normalize_to(&mut buffer, self.volume * config.peak());
        Ok(quantize_buffer(&buffer, config.quantization))
    }
}
