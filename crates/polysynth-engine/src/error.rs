//! Error types for the synthesis engine.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while parsing scores or rendering audio.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Malformed note string (unknown letter, missing or non-numeric octave).
    #[error("invalid note notation '{notation}': {reason}")]
    InvalidNoteNotation {
        /// The offending notation.
        notation: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Melody token that is neither a rest nor a (repeated) note.
    #[error("invalid score token '{token}': {reason}")]
    InvalidScoreToken {
        /// The offending token.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A song was built from zero playables.
    #[error("composition contains no playables")]
    EmptyComposition,

    /// An effect could not process its input buffer.
    #[error("effect '{effect}' failed: {message}")]
    EffectProcessing {
        /// Effect name.
        effect: &'static str,
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// A sample clip uses a layout the loader does not handle.
    #[error("unsupported sample clip: {message}")]
    UnsupportedSample {
        /// Error message.
        message: String,
    },

    /// WAV decoding error while loading a sample clip.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an effect processing error.
    pub fn effect(effect: &'static str, message: impl Into<String>) -> Self {
        Self::EffectProcessing {
            effect,
            message: message.into(),
        }
    }

    pub(crate) fn notation(notation: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNoteNotation {
            notation: notation.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidNoteNotation { .. } => "SYNTH_001",
            SynthError::InvalidScoreToken { .. } => "SYNTH_002",
            SynthError::EmptyComposition => "SYNTH_003",
            SynthError::EffectProcessing { .. } => "SYNTH_004",
            SynthError::InvalidParameter { .. } => "SYNTH_005",
            SynthError::UnsupportedSample { .. } => "SYNTH_006",
            SynthError::Wav(_) => "SYNTH_007",
            SynthError::Io(_) => "SYNTH_008",
        }
    }
}
