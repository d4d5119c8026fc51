//! Raw PCM payload decoding and sample conversion
//!
//! The synthesis collaborator returns audio as a base64-encoded block of
//! 16-bit signed little-endian PCM samples. Everything downstream
//! (playback and the export encoders) works from the decoded samples.

use std::time::Duration;

use base64::Engine;
use thiserror::Error;

/// Errors when decoding a raw audio payload
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("Invalid base64 audio payload: {0}")]
    InvalidBase64(String),

    #[error("Malformed PCM data: {0} bytes is not a whole number of 16-bit samples")]
    OddByteLength(usize),
}

/// Decode a base64 payload into raw bytes
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, DecodeError> {
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Reinterpret raw bytes as little-endian signed 16-bit samples.
/// The byte length must be even.
pub fn bytes_to_samples(bytes: &[u8]) -> Result<Vec<i16>, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddByteLength(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Serialize samples back to little-endian bytes
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Convert samples to the normalized float range [-1.0, 1.0] expected
/// by the playback buffer
pub fn samples_to_f32(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 32768.0).collect()
}

/// Value object holding decoded PCM audio together with its wire format.
/// Derived from a payload, never mutated.
#[derive(Debug, Clone)]
pub struct PcmAudio {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl PcmAudio {
    /// Create from already-decoded samples
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Decode a base64 payload of s16le PCM
    pub fn from_base64(payload: &str, sample_rate: u32, channels: u16) -> Result<Self, DecodeError> {
        let bytes = decode_base64(payload)?;
        let samples = bytes_to_samples(&bytes)?;
        Ok(Self::new(samples, sample_rate, channels))
    }

    /// Get the raw samples
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Get the sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel count
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Byte length of the PCM data when serialized
    pub fn byte_len(&self) -> usize {
        self.samples.len() * 2
    }

    /// Whether there is any audio at all
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Real playback duration of the audio
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }

    /// Serialize to little-endian PCM bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        samples_to_bytes(&self.samples)
    }

    /// Convert to normalized floats for playback
    pub fn to_f32(&self) -> Vec<f32> {
        samples_to_f32(&self.samples)
    }
}
