//! Types for mixer output.

/// A rendered song.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRender {
    /// Mono 16-bit samples.
    pub samples: Vec<i16>,
    /// Sample rate of `samples`.
    pub sample_rate: u32,
    /// Number of voices mixed.
    pub voices: usize,
    /// Samples altered by clipping.
    pub clipped_samples: usize,
}

impl SongRender {
    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> i16 {
        self.samples
            .iter()
            .map(|s| s.saturating_abs())
            .max()
            .unwrap_or(0)
    }
}
