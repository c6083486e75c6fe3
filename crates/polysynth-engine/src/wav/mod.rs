//! Deterministic mono WAV writer.
//!
//! Writes 16-bit PCM WAV files with no timestamps or variable metadata, so
//! equal renders produce equal files. The BLAKE3 hash of the PCM payload is
//! kept alongside for regression comparison.

mod format;
mod pcm;
mod result;
mod writer;


// Re-export public API
pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{encode_wav, samples_to_pcm16};
