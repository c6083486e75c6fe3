//! ADSR envelope evaluated over a whole time axis.
//!
//! Unlike a per-sample state machine, the envelope here is a pure function of
//! time and note duration. Each phase is a clamped linear ramp which is `1.0`
//! outside its own window, and the final gain is the product of the attack,
//! decay and release ramps times the overall level. This lets the same
//! envelope drive amplitude or pitch of any number of notes.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

/// Added to every time parameter so ramps never divide by zero.
pub const EPSILON: f64 = 1e-6;

/// ADSR envelope parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adsr {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level.
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
    /// Overall gain.
    #[serde(default = "default_level")]
    pub level: f64,
}

fn default_level() -> f64 {
    1.0
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.5,
            release: 0.2,
            level: 1.0,
        }
    }
}

impl Adsr {
    /// Creates a new envelope with unit level. Negative times are clamped to zero.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain,
            release: release.max(0.0),
            level: 1.0,
        }
    }

    /// Sets the overall gain.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Attack time including [`EPSILON`].
    pub fn effective_attack(&self) -> f64 {
        self.attack.max(0.0) + EPSILON
    }

    /// Decay time including [`EPSILON`].
    pub fn effective_decay(&self) -> f64 {
        self.decay.max(0.0) + EPSILON
    }

    /// Release time including [`EPSILON`].
    ///
    /// A note sounds for its nominal duration plus this release tail.
    pub fn effective_release(&self) -> f64 {
        self.release.max(0.0) + EPSILON
    }

    /// Gain at a single instant `t` seconds after onset.
    pub fn at(&self, t: f64, note_duration: f64) -> f64 {
        let attack = self.effective_attack();
        let decay = self.effective_decay();
        let release = self.effective_release();

        // Attack and decay are cut short when the note ends before they finish.
        let clipped_attack = attack.min(note_duration);
        let clipped_decay = (note_duration - attack).clamp(0.0, decay);

        let attack_signal = ramp(t, clipped_attack, 0.0);
        let decay_signal =
            (1.0 - self.sustain) * inverse_ramp(t, clipped_decay, clipped_attack) + self.sustain;
        let release_signal = inverse_ramp(t, release, note_duration);

        attack_signal * decay_signal * release_signal * self.level
    }

    /// Gains for every instant of `time`.
    pub fn get(&self, time: &[f64], note_duration: f64) -> Vec<f64> {
        time.iter().map(|&t| self.at(t, note_duration)).collect()
    }
}

/// Scales every time parameter, e.g. to express an envelope in beats.
impl Mul<f64> for Adsr {
    type Output = Adsr;

    fn mul(self, factor: f64) -> Adsr {
        Adsr {
            attack: self.attack * factor,
            decay: self.decay * factor,
            sustain: self.sustain,
            release: self.release * factor,
            level: self.level,
        }
    }
}

/// Rises linearly from 0 at `start` to 1 at `start + duration`.
///
/// A zero-length ramp is a step at `start`.
#[inline]
fn ramp(t: f64, duration: f64, start: f64) -> f64 {
    if duration > 0.0 {
        ((t - start) / duration).clamp(0.0, 1.0)
    } else if t >= start {
        1.0
    } else {
        0.0
    }
}

/// Falls linearly from 1 at `start` to 0 at `start + duration`.
///
/// A zero-length falling ramp contributes no shaping.
#[inline]
fn inverse_ramp(t: f64, duration: f64, start: f64) -> f64 {
    if duration > 0.0 {
        1.0 - ((t - start) / duration).clamp(0.0, 1.0)
    } else {
        1.0
    }
}
