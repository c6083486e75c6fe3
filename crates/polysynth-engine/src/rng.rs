//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Every random draw in the engine (noise voices, noise injection, scratch
//! dropouts) goes through a generator created here. Each voice of a song gets
//! its own stream derived from the song seed and the voice index, so the
//! rendered output does not depend on the order voices are rendered in.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for one voice of a song from the song seed.
///
/// BLAKE3 over `song_seed || voice_index` (little-endian), truncated to u32.
pub fn derive_voice_seed(song_seed: u32, voice_index: u32) -> u32 {
    let mut input = [0u8; 8];
    input[..4].copy_from_slice(&song_seed.to_le_bytes());
    input[4..].copy_from_slice(&voice_index.to_le_bytes());

    let hash = blake3::hash(&input);
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[0..4]);
    u32::from_le_bytes(bytes)
}

/// Creates the RNG for a specific voice.
pub fn create_voice_rng(song_seed: u32, voice_index: u32) -> Pcg32 {
    create_rng(derive_voice_seed(song_seed, voice_index))
}

/// Fills a buffer with uniform noise in `[0, 1)`.
pub fn uniform_noise(rng: &mut Pcg32, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen::<f64>()).collect()
}
