//! Speech synthesis port interface

use async_trait::async_trait;
use thiserror::Error;

/// Sample rate of the PCM audio the synthesizer returns, in Hz
pub const TTS_SAMPLE_RATE: u32 = 24_000;

/// Channel count of the PCM audio the synthesizer returns
pub const TTS_CHANNELS: u16 = 1;

/// Synthesis errors
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Synthesis returned no audio")]
    EmptyAudio,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for text-to-speech synthesis
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize spoken audio for the given text.
    ///
    /// # Arguments
    /// * `text` - The full text to vocalize
    ///
    /// # Returns
    /// A base64-encoded payload of signed 16-bit little-endian PCM at
    /// [`TTS_SAMPLE_RATE`] Hz, [`TTS_CHANNELS`] channel, or an error
    async fn synthesize(&self, text: &str) -> Result<String, SynthesisError>;
}
