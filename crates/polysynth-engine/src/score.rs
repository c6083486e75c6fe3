//! Melody mini-language.
//!
//! A melody is a whitespace-separated list of tokens:
//!
//! ```text
//! token := dashes | [count '*'] note
//! dashes := '-'+            rest of one beat per dash
//! note := letter [accidental] octave
//! ```
//!
//! `count` is the note length in beats (default 1). Every line keeps its own
//! beat cursor; all lines end up in one song, overlapping in time.

use std::sync::Arc;

use crate::effects::Effect;
use crate::error::{SynthError, SynthResult};
use crate::mixer::Song;
use crate::playable::Playable;
use crate::timbre::Timbre;
use crate::tone::Tone;

/// One parsed melody token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Silence for this many beats.
    Rest(f64),
    /// A tone held for this many beats.
    Note { tone: Tone, beats: f64 },
}

impl Token {
    /// Beats the cursor advances past this token.
    pub fn beats(&self) -> f64 {
        match self {
            Token::Rest(beats) => *beats,
            Token::Note { beats, .. } => *beats,
        }
    }

    /// Parses a single token.
    pub fn parse(token: &str) -> SynthResult<Self> {
        if !token.is_empty() && token.chars().all(|c| c == '-') {
            return Ok(Token::Rest(token.len() as f64));
        }

        let (count, notation) = match token.split_once('*') {
            Some((count, notation)) => (Some(count), notation),
            None => (None, token),
        };
        if notation.contains('*') {
            return Err(SynthError::InvalidScoreToken {
                token: token.to_string(),
                reason: "more than one '*'".to_string(),
            });
        }

        let beats = match count {
            None => 1.0,
            Some(count) => {
                let beats: f64 = count.parse().map_err(|_| SynthError::InvalidScoreToken {
                    token: token.to_string(),
                    reason: format!("'{count}' is not a number"),
                })?;
                if !beats.is_finite() || beats <= 0.0 {
                    return Err(SynthError::InvalidScoreToken {
                        token: token.to_string(),
                        reason: format!("note length must be positive, got {beats}"),
                    });
                }
                beats
            }
        };

        Ok(Token::Note {
            tone: Tone::parse(notation)?,
            beats,
        })
    }
}

/// Tokenizes a whole melody.
pub fn parse_melody(melody: &str) -> SynthResult<Vec<Token>> {
    melody.split_whitespace().map(Token::parse).collect()
}

/// One voice line of a score: a timbre, its melody and per-note effects.
#[derive(Debug, Clone)]
pub struct ScoreLine {
    pub timbre: Arc<Timbre>,
    pub melody: String,
    pub effects: Vec<Effect>,
}

impl ScoreLine {
    pub fn new(timbre: Arc<Timbre>, melody: impl Into<String>) -> Self {
        Self {
            timbre,
            melody: melody.into(),
            effects: Vec::new(),
        }
    }

    /// Sets the effects applied to every note of the line.
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }

    /// Notes of this line at `bpm`, in order.
    pub fn notes(&self, bpm: f64) -> SynthResult<Vec<Playable>> {
        let seconds_per_beat = seconds_per_beat(bpm)?;
        let mut cursor = 0.0;
        let mut notes = Vec::new();
        for token in parse_melody(&self.melody)? {
            if let Token::Note { tone, beats } = token {
                notes.push(
                    Playable::note(
                        tone,
                        Arc::clone(&self.timbre),
                        cursor * seconds_per_beat,
                        beats * seconds_per_beat,
                    )
                    .with_effects(self.effects.iter().cloned()),
                );
            }
            cursor += token.beats();
        }
        Ok(notes)
    }
}

fn seconds_per_beat(bpm: f64) -> SynthResult<f64> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(SynthError::invalid_param(
            "bpm",
            format!("must be positive, got {bpm}"),
        ));
    }
    Ok(60.0 / bpm)
}

/// Flattens every line into one list of notes.
pub fn notes_from_lines(bpm: f64, lines: &[ScoreLine]) -> SynthResult<Vec<Playable>> {
    let mut notes = Vec::new();
    for line in lines {
        notes.extend(line.notes(bpm)?);
    }
    Ok(notes)
}

impl Song {
    /// Builds a song from score lines at `bpm`.
    pub fn from_lines(bpm: f64, lines: &[ScoreLine]) -> SynthResult<Song> {
        Song::new(notes_from_lines(bpm, lines)?)
    }
}
