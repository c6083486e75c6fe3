//! Encoded WAV output.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::format::WavFormat;
use super::writer::{encode_wav, samples_to_pcm16};
use crate::error::SynthResult;
use crate::mixer::SongRender;

/// An encoded mono WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono 16-bit samples.
    pub fn from_samples(samples: &[i16], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = encode_wav(&WavFormat::mono(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Encodes a rendered song.
    pub fn from_render(render: &SongRender) -> Self {
        Self::from_samples(&render.samples, render.sample_rate)
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the file to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> SynthResult<()> {
        let path = path.as_ref();
        fs::write(path, &self.wav_data)?;
        debug!(path = %path.display(), bytes = self.wav_data.len(), "wrote wav");
        Ok(())
    }
}
