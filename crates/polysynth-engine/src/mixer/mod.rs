//! Song mixing.
//!
//! Voices are rendered independently, summed at their start offsets into a
//! wide integer buffer, clipped to the max amplitude and scaled by the song
//! volume.

mod processing;
mod song;
mod types;

#[cfg(test)]
mod tests_processing;
#[cfg(test)]
mod tests_song;

// Re-export public API
pub use processing::{add_at, clip, normalize_to, peak, quantize_buffer};
pub use song::Song;
pub use types::SongRender;
