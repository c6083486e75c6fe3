//! Musical notation to semitone id and frequency.
//!
//! Semitone ids follow the MIDI numbering: `12 * (octave + 1) + offset`, where
//! id 69 is the A4 reference pitch at 440 Hz.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Semitone id of the reference pitch.
pub const REFERENCE_ID: i32 = 69;

/// Frequency of the reference pitch in Hz.
pub const REFERENCE_FREQUENCY: f64 = 440.0;

/// Converts a semitone interval to a frequency ratio (`2^(st/12)`).
#[inline]
pub fn semitones_to_ratio(semitones: f64) -> f64 {
    2.0_f64.powf(semitones / 12.0)
}

/// Semitone offset of a note letter within its octave.
fn letter_offset(letter: char) -> Option<i32> {
    match letter.to_ascii_lowercase() {
        'c' => Some(0),
        'd' => Some(2),
        'e' => Some(4),
        'f' => Some(5),
        'g' => Some(7),
        'a' => Some(9),
        'b' => Some(11),
        _ => None,
    }
}

/// Accidental applied to a note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// An immutable pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tone {
    semitone_id: i32,
}

impl Tone {
    /// Creates a tone from a raw semitone id.
    pub fn from_semitone(semitone_id: i32) -> Self {
        Self { semitone_id }
    }

    /// Creates a tone from a letter, an octave and an accidental.
    ///
    /// The letter is case-insensitive and must be one of `a`..`g`.
    pub fn from_notation(letter: char, octave: i32, accidental: Accidental) -> SynthResult<Self> {
        let offset = letter_offset(letter).ok_or_else(|| {
            SynthError::notation(&letter.to_string(), format!("unknown note letter '{letter}'"))
        })?;
        let semitone_id = octave
            .checked_add(1)
            .and_then(|o| o.checked_mul(12))
            .and_then(|id| id.checked_add(offset + accidental.offset()))
            .ok_or_else(|| {
                SynthError::notation(&format!("{letter}{octave}"), "octave out of range")
            })?;
        Ok(Self { semitone_id })
    }

    /// Parses the compact `<letter><accidental?><octave>` form, e.g. `c#4` or `eb3`.
    ///
    /// The accidental (`#` or `b`) is only recognized right after the letter;
    /// everything after it must be an integer octave.
    pub fn parse(notation: &str) -> SynthResult<Self> {
        let mut chars = notation.chars();
        let letter = chars
            .next()
            .ok_or_else(|| SynthError::notation(notation, "empty notation"))?;
        if letter_offset(letter).is_none() {
            return Err(SynthError::notation(
                notation,
                format!("unknown note letter '{letter}'"),
            ));
        }

        let rest = chars.as_str();
        let (accidental, octave_str) = if let Some(stripped) = rest.strip_prefix('#') {
            (Accidental::Sharp, stripped)
        } else if let Some(stripped) = rest.strip_prefix('b') {
            (Accidental::Flat, stripped)
        } else {
            (Accidental::Natural, rest)
        };

        if octave_str.is_empty() {
            return Err(SynthError::notation(notation, "missing octave"));
        }
        let octave: i32 = octave_str
            .parse()
            .map_err(|_| SynthError::notation(notation, format!("non-numeric octave '{octave_str}'")))?;

        Self::from_notation(letter, octave, accidental)
    }

    /// The semitone id (69 = A4).
    pub fn semitone_id(&self) -> i32 {
        self.semitone_id
    }

    /// Frequency in Hz: `440 * 2^((id - 69) / 12)`.
    pub fn frequency(&self) -> f64 {
        REFERENCE_FREQUENCY * semitones_to_ratio((self.semitone_id - REFERENCE_ID) as f64)
    }

    /// Returns this tone shifted by `interval` semitones, saturating at the
    /// bounds of the id range.
    pub fn transposed(&self, interval: i32) -> Self {
        Self::from_semitone(self.semitone_id.saturating_add(interval))
    }
}

impl FromStr for Tone {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tone {
    type Error = SynthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.to_string()
    }
}

impl fmt::Display for Tone {
    /// Sharp spelling, e.g. `c#4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 12] = [
            "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b",
        ];
        let octave = self.semitone_id.div_euclid(12) - 1;
        let name = NAMES[self.semitone_id.rem_euclid(12) as usize];
        write!(f, "{name}{octave}")
    }
}
