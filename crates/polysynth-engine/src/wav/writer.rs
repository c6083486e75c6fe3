//! WAV encoding.

use super::format::WavFormat;

/// Size of the RIFF, fmt and data chunk headers.
pub(crate) const HEADER_LEN: usize = 44;

/// Encodes a complete WAV file.
pub fn encode_wav(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let data_size = pcm_data.len() as u32;
    let mut out = Vec::with_capacity(HEADER_LEN + pcm_data.len());

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());
    out.extend_from_slice(&format.byte_rate().to_le_bytes());
    out.extend_from_slice(&format.block_align().to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(pcm_data);

    out
}

/// Serializes samples as little-endian 16-bit PCM.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}
