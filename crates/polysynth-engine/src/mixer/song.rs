//! Time-ordered composition of playables.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::processing::{add_at, clip, quantize_buffer};
use super::types::SongRender;
use crate::config::{ClipMode, RenderConfig};
use crate::effects::{apply_effect_chain, preprocess_chain, Effect, EffectContext};
use crate::error::{SynthError, SynthResult};
use crate::playable::Playable;
use crate::rng::create_voice_rng;

/// Voice index reserved for the song-level effect chain's random stream.
const SONG_EFFECTS_STREAM: u32 = u32::MAX;

/// An ordered collection of playables mixed into one buffer.
///
/// Playables are kept sorted by start time; playables with equal starts keep
/// their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    playables: Vec<Playable>,
    length: f64,
    /// Post-mix gain.
    pub volume: f64,
    /// Effects applied to the mix before clipping.
    pub effects: Vec<Effect>,
    /// Seed for every random stream of the render.
    pub seed: u32,
}

impl Song {
    /// Creates a song from a non-empty list of playables.
    pub fn new(playables: Vec<Playable>) -> SynthResult<Self> {
        if playables.is_empty() {
            return Err(SynthError::EmptyComposition);
        }
        for playable in &playables {
            playable.validate()?;
        }

        let mut playables = playables;
        playables.sort_by(|a, b| a.start.total_cmp(&b.start));
        let length = max_end(&playables);

        Ok(Self {
            playables,
            length,
            volume: 1.0,
            effects: Vec::new(),
            seed: 0,
        })
    }

    /// Sets the post-mix gain.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the song-level effect chain.
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Inserts a playable after every playable starting at or before it.
    pub fn add(&mut self, playable: Playable) -> SynthResult<()> {
        playable.validate()?;
        let index = self
            .playables
            .partition_point(|p| p.start <= playable.start);
        self.playables.insert(index, playable);
        self.length = max_end(&self.playables);
        Ok(())
    }

    /// Inserts several playables.
    pub fn extend(&mut self, playables: impl IntoIterator<Item = Playable>) -> SynthResult<()> {
        for playable in playables {
            self.add(playable)?;
        }
        Ok(())
    }

    /// Seconds until the last playable ends.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Playables in start order.
    pub fn playables(&self) -> &[Playable] {
        &self.playables
    }

    /// Renders every voice into its own buffer, in start order.
    ///
    /// Each voice draws from its own random stream, derived from the song
    /// seed and its position, so the result does not depend on scheduling.
    pub fn render_voices(&self, config: &RenderConfig) -> SynthResult<Vec<Vec<i16>>> {
        let render_one = |(index, playable): (usize, &Playable)| -> SynthResult<Vec<i16>> {
            let mut rng = create_voice_rng(self.seed, index as u32);
            let voice = playable.generate(config, &mut rng)?;
            debug!(
                index,
                kind = playable.source.kind(),
                start = playable.start,
                samples = voice.len(),
                "rendered voice"
            );
            Ok(voice)
        };

        if config.parallel {
            self.playables
                .par_iter()
                .enumerate()
                .map(render_one)
                .collect()
        } else {
            self.playables.iter().enumerate().map(render_one).collect()
        }
    }

    /// Sums every voice at its start offset into a wide buffer covering
    /// `[0, length)`. With [`ClipMode::ClipEachStep`] the buffer is clipped
    /// after each voice; otherwise it is returned unclipped.
    pub fn generate_raw(&self, config: &RenderConfig) -> SynthResult<(Vec<i32>, usize)> {
        let voices = self.render_voices(config)?;
        let limit = config.max_amplitude as i32;

        let mut mix = vec![0i32; config.samples_for(self.length)];
        let mut clipped = 0;
        for (playable, voice) in self.playables.iter().zip(&voices) {
            add_at(&mut mix, config.samples_for(playable.start), voice);
            if config.clipping == ClipMode::ClipEachStep {
                clipped += clip(&mut mix, limit);
            }
        }
        Ok((mix, clipped))
    }

    /// Renders the full composition.
    pub fn render(&self, config: &RenderConfig) -> SynthResult<SongRender> {
        config.validate()?;
        preprocess_chain(&self.effects)?;
        let (mut mix, mut clipped) = self.generate_raw(config)?;

        if !self.effects.is_empty() {
            let time = config.time_axis(self.length);
            let buffer: Vec<f64> = mix.iter().map(|&s| s as f64).collect();
            let mut rng = create_voice_rng(self.seed, SONG_EFFECTS_STREAM);
            let mut ctx = EffectContext {
                config,
                length: self.length,
                volume: 1.0,
                rng: &mut rng,
            };
            let processed = apply_effect_chain(&time, buffer, &self.effects, &mut ctx)?;
            mix = processed
                .into_iter()
                .map(|s| s.clamp(i32::MIN as f64, i32::MAX as f64) as i32)
                .collect();
        }

        clipped += clip(&mut mix, config.max_amplitude as i32);
        if clipped > 0 {
            warn!(clipped, "clipping altered samples");
        }

        let scaled: Vec<f64> = mix.iter().map(|&s| s as f64 * self.volume).collect();
        let samples = quantize_buffer(&scaled, config.quantization);

        info!(
            voices = self.playables.len(),
            seconds = self.length,
            samples = samples.len(),
            "rendered song"
        );

        Ok(SongRender {
            samples,
            sample_rate: config.sample_rate,
            voices: self.playables.len(),
            clipped_samples: clipped,
        })
    }
}

fn max_end(playables: &[Playable]) -> f64 {
    playables
        .iter()
        .map(Playable::end)
        .fold(0.0_f64, f64::max)
}
