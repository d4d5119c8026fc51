//! Export encoder port interface
//!
//! One encoder per export format, all behind the same contract so the
//! orchestrator never sees encoder-specific timing or failure quirks.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{ExportFormat, PcmAudio};

/// Encoding errors
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    /// The encoding library could not be loaded or configured.
    /// Permanent for the session; the user should pick another format.
    #[error("The {format} encoder is unavailable: {reason}")]
    EncoderUnavailable { format: ExportFormat, reason: String },

    /// This runtime cannot produce the container/codec combination at
    /// all. Detected before any capture is attempted.
    #[error("The {format} format is not supported here: {reason}")]
    UnsupportedFormat { format: ExportFormat, reason: String },

    /// The capture ran but produced no data. Transient; safe to retry.
    #[error("Audio capture produced no data")]
    EmptyRecording,

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Port for encoding decoded PCM into a downloadable byte blob
#[async_trait]
pub trait AudioEncoder: Send + Sync {
    /// The format this encoder produces
    fn format(&self) -> ExportFormat;

    /// Encode the audio into the target format.
    ///
    /// # Arguments
    /// * `audio` - The decoded PCM with its sample rate and channels
    ///
    /// # Returns
    /// The complete file contents, or a typed failure
    async fn encode(&self, audio: &PcmAudio) -> Result<Vec<u8>, EncodeError>;
}
