//! JSON score files.
//!
//! ```json
//! {
//!   "bpm": 110,
//!   "seed": 7,
//!   "timbres": {
//!     "organ": {
//!       "harmonics": [
//!         {"relative_frequency": 1.0, "relative_amplitude": 1.0},
//!         {"relative_frequency": 2.0, "relative_amplitude": 0.5, "oscillator": "triangle"}
//!       ],
//!       "amplitude_envelope": {"attack": 0.02, "decay": 0.1, "sustain": 0.6, "release": 0.3}
//!     }
//!   },
//!   "lines": [{"timbre": "organ", "melody": "c4 c4 c4 d4 2*e4"}]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use polysynth_engine::{
    Effect, Playable, RenderConfig, Sample, SampleOptions, ScoreLine, Song, Timbre,
};
use serde::Deserialize;

fn one() -> f64 {
    1.0
}

/// A melody line played by a named timbre.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineSpec {
    pub timbre: String,
    pub melody: String,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

/// A WAV clip placed on the timeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleSpec {
    /// Clip path, relative to the score file.
    pub path: PathBuf,
    #[serde(default)]
    pub start: f64,
    /// Seconds skipped at the start of the clip.
    #[serde(default)]
    pub offset: f64,
    /// Seconds of the clip kept; all of it when absent.
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default = "one")]
    pub volume: f64,
    /// Semitones.
    #[serde(default)]
    pub transpose: f64,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

/// Top-level score document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreFile {
    pub bpm: f64,
    #[serde(default)]
    pub seed: u32,
    #[serde(default = "one")]
    pub volume: f64,
    #[serde(default)]
    pub config: RenderConfig,
    #[serde(default)]
    pub timbres: BTreeMap<String, Timbre>,
    #[serde(default)]
    pub lines: Vec<LineSpec>,
    #[serde(default)]
    pub samples: Vec<SampleSpec>,
    /// Effects applied to the whole mix.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl ScoreFile {
    /// Parses a score from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid score JSON")
    }

    /// Reads and parses a score file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read score '{}'", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in '{}'", path.display()))
    }

    /// Resolves timbre names into engine score lines.
    pub fn score_lines(&self) -> Result<Vec<ScoreLine>> {
        let timbres: BTreeMap<&str, Arc<Timbre>> = self
            .timbres
            .iter()
            .map(|(name, timbre)| (name.as_str(), Arc::new(timbre.clone())))
            .collect();

        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let Some(timbre) = timbres.get(line.timbre.as_str()) else {
                    bail!("line {i} uses unknown timbre '{}'", line.timbre);
                };
                Ok(ScoreLine::new(Arc::clone(timbre), line.melody.clone())
                    .with_effects(line.effects.clone()))
            })
            .collect()
    }

    /// Loads every clip, resolving paths against `base_dir`.
    pub fn sample_playables(&self, base_dir: &Path) -> Result<Vec<Playable>> {
        self.samples
            .iter()
            .map(|spec| {
                let path = base_dir.join(&spec.path);
                let options = SampleOptions {
                    offset: spec.offset,
                    duration: spec.length,
                };
                let sample = Sample::load(&path, &options, &self.config)
                    .with_context(|| format!("failed to load sample '{}'", path.display()))?
                    .transposed(spec.transpose)
                    .with_context(|| format!("failed to transpose '{}'", path.display()))?;
                Ok(Playable::sample(sample, spec.start)
                    .with_volume(spec.volume)
                    .with_effects(spec.effects.iter().cloned()))
            })
            .collect()
    }

    /// Builds the song: every line's notes plus every clip.
    pub fn build_song(&self, base_dir: &Path) -> Result<Song> {
        let mut playables = polysynth_engine::score::notes_from_lines(self.bpm, &self.score_lines()?)?;
        playables.extend(self.sample_playables(base_dir)?);

        let song = Song::new(playables)?
            .with_volume(self.volume)
            .with_effects(self.effects.clone())
            .with_seed(self.seed);
        Ok(song)
    }
}
