//! Playback hand-off.
//!
//! Rendering never touches an audio device. Finished buffers are handed to a
//! [`PlaybackSink`]; real-time output is up to the implementor.

use std::path::PathBuf;

use tracing::info;

use crate::error::SynthResult;
use crate::wav::WavResult;

/// Consumer of finished PCM buffers.
pub trait PlaybackSink {
    /// Accepts a mono buffer. With `wait`, returns only once playback is done.
    fn play(&mut self, samples: &[i16], sample_rate: u32, wait: bool) -> SynthResult<()>;
}

/// Writes every buffer it receives to a WAV file.
#[derive(Debug, Clone)]
pub struct WavFileSink {
    path: PathBuf,
    last: Option<WavResult>,
}

impl WavFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last: None,
        }
    }

    /// Target path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// The most recently written file.
    pub fn last_written(&self) -> Option<&WavResult> {
        self.last.as_ref()
    }
}

impl PlaybackSink for WavFileSink {
    // Writing is synchronous, so `wait` changes nothing.
    fn play(&mut self, samples: &[i16], sample_rate: u32, _wait: bool) -> SynthResult<()> {
        let wav = WavResult::from_samples(samples, sample_rate);
        wav.save(&self.path)?;
        info!(
            path = %self.path.display(),
            seconds = wav.duration_seconds(),
            pcm_hash = %wav.pcm_hash,
            "wrote song"
        );
        self.last = Some(wav);
        Ok(())
    }
}

/// Keeps buffers in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub played: Vec<(Vec<i16>, u32)>,
}

impl PlaybackSink for MemorySink {
    fn play(&mut self, samples: &[i16], sample_rate: u32, _wait: bool) -> SynthResult<()> {
        self.played.push((samples.to_vec(), sample_rate));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_file_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let mut sink = WavFileSink::new(&path);
        sink.play(&[0, 1, 2, 3], 44100, true).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let written = sink.last_written().unwrap();
        assert_eq!(bytes, written.wav_data);
        assert_eq!(written.num_samples, 4);
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::default();
        sink.play(&[5, 6], 8000, false).unwrap();
        sink.play(&[7], 8000, true).unwrap();
        assert_eq!(sink.played, vec![(vec![5, 6], 8000), (vec![7], 8000)]);
    }
}
