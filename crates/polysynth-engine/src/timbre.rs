//! Instrument descriptions: harmonics plus amplitude and pitch envelopes.

use serde::{Deserialize, Serialize};

use crate::envelope::Adsr;
use crate::oscillator::Waveform;
use crate::tone::semitones_to_ratio;

/// One partial of an additive sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    /// Frequency relative to the note's fundamental.
    pub relative_frequency: f64,
    /// Amplitude relative to the other partials.
    pub relative_amplitude: f64,
    /// Waveform of this partial.
    #[serde(default)]
    pub oscillator: Waveform,
}

impl Harmonic {
    /// Creates a new harmonic.
    pub fn new(relative_frequency: f64, relative_amplitude: f64, oscillator: Waveform) -> Self {
        Self {
            relative_frequency,
            relative_amplitude,
            oscillator,
        }
    }
}

/// Reusable instrument description, independent of pitch and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timbre {
    /// Partials summed by additive synthesis.
    pub harmonics: Vec<Harmonic>,
    /// Gain over the note's lifetime.
    pub amplitude_envelope: Adsr,
    /// Pitch offset in semitones over the note's lifetime.
    #[serde(default)]
    pub pitch_envelope: Option<Adsr>,
}

impl Timbre {
    /// Creates a timbre without pitch envelope.
    pub fn new(harmonics: Vec<Harmonic>, amplitude_envelope: Adsr) -> Self {
        Self {
            harmonics,
            amplitude_envelope,
            pitch_envelope: None,
        }
    }

    /// Sets the pitch envelope.
    pub fn with_pitch_envelope(mut self, pitch_envelope: Adsr) -> Self {
        self.pitch_envelope = Some(pitch_envelope);
        self
    }

    /// A single sine partial.
    pub fn sine(amplitude_envelope: Adsr) -> Self {
        Self::new(
            vec![Harmonic::new(1.0, 1.0, Waveform::Sine)],
            amplitude_envelope,
        )
    }

    /// Per-sample frequency multiplier from the pitch envelope, if any.
    ///
    /// The envelope output is read as a semitone offset.
    pub fn pitch_ratio(&self, time: &[f64], note_duration: f64) -> Option<Vec<f64>> {
        self.pitch_envelope.as_ref().map(|env| {
            env.get(time, note_duration)
                .into_iter()
                .map(semitones_to_ratio)
                .collect()
        })
    }
}
