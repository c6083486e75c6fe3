//! PCM clips loaded from WAV files.

use std::path::Path;
use std::sync::Arc;

use rand_pcg::Pcg32;
use tracing::debug;

use super::RenderRaw;
use crate::config::RenderConfig;
use crate::effects::transpose::pitch_shift;
use crate::error::{SynthError, SynthResult};

/// Which part of a file to load.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleOptions {
    /// Seconds skipped at the start of the file.
    pub offset: f64,
    /// Seconds kept after the offset; the rest of the file when `None`.
    pub duration: Option<f64>,
}

/// Immutable mono clip at the render sample rate, values in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    data: Arc<Vec<f64>>,
    sample_rate: u32,
}

impl Sample {
    /// Wraps already-decoded mono data.
    pub fn from_samples(data: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            data: Arc::new(data),
            sample_rate,
        }
    }

    /// Loads a WAV clip, mixing channels down to mono.
    ///
    /// The file must already be at the configured sample rate.
    pub fn load(
        path: impl AsRef<Path>,
        options: &SampleOptions,
        config: &RenderConfig,
    ) -> SynthResult<Self> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        if spec.sample_rate != config.sample_rate {
            return Err(SynthError::UnsupportedSample {
                message: format!(
                    "'{}' is {} Hz, expected {} Hz",
                    path.display(),
                    spec.sample_rate,
                    config.sample_rate
                ),
            });
        }

        let interleaved: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Int => {
                if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                    return Err(SynthError::UnsupportedSample {
                        message: format!(
                            "'{}' has unsupported bit depth {}",
                            path.display(),
                            spec.bits_per_sample
                        ),
                    });
                }
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / scale))
                    .collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<_, _>>()?,
        };

        let channels = spec.channels.max(1) as usize;
        let mono: Vec<f64> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
            .collect();

        let first = config.samples_for(options.offset).min(mono.len());
        let last = match options.duration {
            Some(duration) => (first + config.samples_for(duration)).min(mono.len()),
            None => mono.len(),
        };

        debug!(
            path = %path.display(),
            channels,
            samples = last - first,
            "loaded sample"
        );
        Ok(Self::from_samples(mono[first..last].to_vec(), config.sample_rate))
    }

    /// Decoded mono data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample rate of the data.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration of the data in seconds.
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 / self.sample_rate as f64
    }

    /// Pitch-shifts the clip in place, keeping its duration.
    pub fn transpose(&mut self, interval: f64) -> SynthResult<()> {
        if interval != 0.0 {
            self.data = Arc::new(pitch_shift(&self.data, interval)?);
        }
        Ok(())
    }

    /// Pitch-shifted copy of the clip.
    pub fn transposed(&self, interval: f64) -> SynthResult<Self> {
        let mut shifted = self.clone();
        shifted.transpose(interval)?;
        Ok(shifted)
    }
}

impl RenderRaw for Sample {
    fn render_raw(&self, time: &[f64], _config: &RenderConfig, _rng: &mut Pcg32) -> Vec<f64> {
        let mut out = vec![0.0; time.len()];
        let n = out.len().min(self.data.len());
        out[..n].copy_from_slice(&self.data[..n]);
        out
    }
}
