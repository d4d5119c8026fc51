//! RIFF/WAVE container construction
//!
//! A WAV file for mono 16-bit PCM is a fixed 44-byte header followed by
//! the raw sample bytes, so the header is built by hand instead of
//! pulling in a container library. All multi-byte fields are
//! little-endian.

use super::pcm::PcmAudio;

/// Length of the canonical header for mono 16-bit PCM
pub const HEADER_LEN: usize = 44;

/// Bytes per sample frame (mono, 16-bit)
const BLOCK_ALIGN: u16 = 2;

/// Build the 44-byte RIFF/WAVE header for mono 16-bit PCM audio.
/// Deterministic: identical inputs produce identical bytes.
pub fn header(pcm_byte_len: u32, sample_rate: u32) -> [u8; HEADER_LEN] {
    let mut h = [0u8; HEADER_LEN];

    h[0..4].copy_from_slice(b"RIFF");
    h[4..8].copy_from_slice(&(36 + pcm_byte_len).to_le_bytes());
    h[8..12].copy_from_slice(b"WAVE");

    // "fmt " chunk
    h[12..16].copy_from_slice(b"fmt ");
    h[16..20].copy_from_slice(&16u32.to_le_bytes());
    h[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM format tag
    h[22..24].copy_from_slice(&1u16.to_le_bytes()); // mono
    h[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    h[28..32].copy_from_slice(&(sample_rate * BLOCK_ALIGN as u32).to_le_bytes()); // byte rate
    h[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
    h[34..36].copy_from_slice(&16u16.to_le_bytes()); // bits per sample

    // "data" chunk
    h[36..40].copy_from_slice(b"data");
    h[40..44].copy_from_slice(&pcm_byte_len.to_le_bytes());

    h
}

/// Produce a complete WAV file: header followed by the raw PCM bytes
pub fn encode(audio: &PcmAudio) -> Vec<u8> {
    let pcm = audio.to_bytes();
    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(&header(pcm.len() as u32, audio.sample_rate()));
    out.extend_from_slice(&pcm);
    out
}
