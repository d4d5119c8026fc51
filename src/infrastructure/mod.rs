//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini API, the audio
//! output device, and the encoding libraries.

pub mod config;
pub mod encoding;
pub mod playback;
pub mod saving;
pub mod synthesis;

// Re-export adapters
pub use config::XdgConfigStore;
pub use encoding::{default_encoders, AacCaptureEncoder, LameMp3Encoder, WavEncoder};
pub use playback::RodioPlayer;
pub use saving::DirArtifactStore;
pub use synthesis::GeminiSynthesizer;
