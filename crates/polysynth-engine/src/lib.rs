//! Polysynth Engine
//!
//! Offline polyphonic additive synthesis: notes described by a tone and a
//! timbre are rendered by summing harmonics, shaped by ADSR envelopes on
//! amplitude and pitch, post-processed by an effect chain and mixed into one
//! mono 16-bit buffer.
//!
//! # Overview
//!
//! - **Tone** - note notation to semitone id and frequency
//! - **Envelope** - vectorized ADSR gain curves
//! - **Oscillators** - sine, square, triangle, sawtooth, pulse
//! - **Timbre** - harmonics plus amplitude and pitch envelopes
//! - **Playable** - note, oscillator, sample, noise, silence
//! - **Effects** - noise, normalize, transpose, scratch, low-pass
//! - **Song** - time-ordered mix of playables
//! - **Score** - melody mini-language at a tempo
//!
//! # Determinism
//!
//! Rendering is deterministic. Every random stream is a PCG32 generator whose
//! seed is derived from the song seed and the voice index with BLAKE3, so a
//! parallel render is bit-identical to a sequential one.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use polysynth_engine::{Adsr, RenderConfig, ScoreLine, Song, Timbre, WavResult};
//!
//! let piano = Arc::new(Timbre::sine(Adsr::new(0.01, 0.2, 0.4, 0.3)));
//! let song = Song::from_lines(110.0, &[ScoreLine::new(piano, "c4 c4 c4 d4 2*e4")])?;
//! let render = song.render(&RenderConfig::default())?;
//! WavResult::from_render(&render).save("out.wav")?;
//! ```

pub mod config;
pub mod effects;
pub mod envelope;
pub mod error;
pub mod mixer;
pub mod modulation;
pub mod oscillator;
pub mod playable;
pub mod playback;
pub mod rng;
pub mod score;
pub mod timbre;
pub mod tone;
pub mod wav;

// Re-export main types at crate root
pub use config::{ClipMode, Quantization, RenderConfig};
pub use effects::Effect;
pub use envelope::Adsr;
pub use error::{SynthError, SynthResult};
pub use mixer::{Song, SongRender};
pub use modulation::{Lfo, LinearTransition, Modulator, Value};
pub use oscillator::Waveform;
pub use playable::{Playable, Sample, SampleOptions, Source};
pub use playback::{PlaybackSink, WavFileSink};
pub use score::ScoreLine;
pub use timbre::{Harmonic, Timbre};
pub use tone::Tone;
pub use wav::WavResult;
