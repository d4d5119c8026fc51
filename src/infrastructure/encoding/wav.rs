//! WAV passthrough encoder
//!
//! No compression: the 44-byte RIFF header is prepended to the raw PCM
//! bytes and that is the file.

use async_trait::async_trait;

use crate::application::ports::{AudioEncoder, EncodeError};
use crate::domain::audio::{wav, ExportFormat, PcmAudio};

/// Uncompressed WAV encoder
pub struct WavEncoder;

impl WavEncoder {
    /// Create a new WAV encoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for WavEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioEncoder for WavEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Wav
    }

    async fn encode(&self, audio: &PcmAudio) -> Result<Vec<u8>, EncodeError> {
        Ok(wav::encode(audio))
    }
}
