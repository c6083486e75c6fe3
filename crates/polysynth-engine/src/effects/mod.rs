//! Per-voice post-processing effects.
//!
//! Effects run in declared order on a playable's raw float buffer, before the
//! playable is normalized and quantized. Every parameter is a [`Value`], so it
//! can be a constant or follow a modulator over the playable's time axis.

pub mod lowpass;
pub mod noise;
pub mod transpose;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::error::{SynthError, SynthResult};
use crate::mixer::normalize_to;
use crate::modulation::Value;

/// Everything an effect may read about the playable it belongs to.
pub struct EffectContext<'a> {
    /// Render configuration.
    pub config: &'a RenderConfig,
    /// Owning playable's length in seconds.
    pub length: f64,
    /// Owning playable's volume.
    pub volume: f64,
    /// The owning voice's random stream.
    pub rng: &'a mut Pcg32,
}

fn one() -> Value {
    Value::Constant(1.0)
}

fn zero() -> Value {
    Value::Constant(0.0)
}

fn default_scratch_probability() -> Value {
    Value::Constant(0.02)
}

/// A post-processing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Adds uniform noise scaled by `volume * max_amplitude`.
    Noise {
        volume: Value,
    },
    /// Rescales the buffer peak to `volume * max_amplitude`.
    Normalize,
    /// Pitch-shifts by `interval` semitones, preserving duration.
    Transpose {
        interval: Value,
    },
    /// Replaces each sample with uniform noise with probability `probability`.
    Scratch {
        #[serde(default = "default_scratch_probability")]
        probability: Value,
    },
    /// Frequency-domain low-pass mask with an optional resonant bump.
    LowPassFilter {
        /// Cutoff frequency in Hz.
        cutoff: Value,
        /// Extra gain at the cutoff.
        #[serde(default = "zero")]
        resonance: Value,
        /// Width in Hz of the roll-off above the cutoff.
        #[serde(default = "one")]
        cutout_width: Value,
        /// Width in Hz of the rise into the resonant bump.
        #[serde(default = "one")]
        resonance_width: Value,
    },
}

impl Effect {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Noise { .. } => "noise",
            Effect::Normalize => "normalize",
            Effect::Transpose { .. } => "transpose",
            Effect::Scratch { .. } => "scratch",
            Effect::LowPassFilter { .. } => "low_pass_filter",
        }
    }

    /// Checks constant parameters before the owning playable renders.
    pub fn preprocess(&self) -> SynthResult<()> {
        match self {
            Effect::Scratch { probability } => {
                if let Some(p) = probability.as_constant() {
                    if !(0.0..=1.0).contains(&p) {
                        return Err(SynthError::invalid_param(
                            "probability",
                            format!("must be within [0, 1], got {p}"),
                        ));
                    }
                }
            }
            Effect::LowPassFilter {
                cutout_width,
                resonance_width,
                ..
            } => {
                for (name, value) in [
                    ("cutout_width", cutout_width),
                    ("resonance_width", resonance_width),
                ] {
                    if let Some(width) = value.as_constant() {
                        if width < 0.0 {
                            return Err(SynthError::invalid_param(
                                name,
                                format!("must be non-negative, got {width}"),
                            ));
                        }
                    }
                }
            }
            Effect::Noise { .. } | Effect::Normalize | Effect::Transpose { .. } => {}
        }
        Ok(())
    }

    /// Transforms `buffer`, returning a buffer of the same length.
    pub fn postprocess(
        &self,
        time: &[f64],
        buffer: Vec<f64>,
        ctx: &mut EffectContext<'_>,
    ) -> SynthResult<Vec<f64>> {
        match self {
            Effect::Noise { volume } => Ok(noise::inject_noise(
                buffer,
                &volume.resolve(time),
                ctx.config.peak(),
                ctx.rng,
            )),
            Effect::Normalize => {
                let mut buffer = buffer;
                normalize_to(&mut buffer, ctx.volume * ctx.config.peak());
                Ok(buffer)
            }
            Effect::Transpose { interval } => {
                let semitones = interval.resolve_scalar(time);
                if semitones == 0.0 {
                    return Ok(buffer);
                }
                transpose::pitch_shift(&buffer, semitones)
            }
            Effect::Scratch { probability } => Ok(noise::scratch(
                buffer,
                &probability.resolve(time),
                ctx.config.peak(),
                ctx.rng,
            )),
            Effect::LowPassFilter {
                cutoff,
                resonance,
                cutout_width,
                resonance_width,
            } => {
                let filter = lowpass::LowPassFilter {
                    cutoff: cutoff.resolve_scalar(time),
                    resonance: resonance.resolve_scalar(time),
                    cutout_width: cutout_width.resolve_scalar(time),
                    resonance_width: resonance_width.resolve_scalar(time),
                };
                filter.apply(&buffer, ctx.length)
            }
        }
    }
}

/// Runs every effect's parameter check.
pub fn preprocess_chain(effects: &[Effect]) -> SynthResult<()> {
    effects.iter().try_for_each(Effect::preprocess)
}

/// Applies a chain of effects in declared order.
pub fn apply_effect_chain(
    time: &[f64],
    buffer: Vec<f64>,
    effects: &[Effect],
    ctx: &mut EffectContext<'_>,
) -> SynthResult<Vec<f64>> {
    let mut buffer = buffer;
    for effect in effects {
        buffer = effect.postprocess(time, buffer, ctx)?;
    }
    Ok(buffer)
}
