//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod encoder;
pub mod player;
pub mod saver;
pub mod synthesizer;

// Re-export common types
pub use config::ConfigStore;
pub use encoder::{AudioEncoder, EncodeError};
pub use player::{AudioPlayer, PlaybackError, PlaybackSession, PlaybackState, SessionDriver};
pub use saver::{ArtifactStore, SaveError};
pub use synthesizer::{SpeechSynthesizer, SynthesisError, TTS_CHANNELS, TTS_SAMPLE_RATE};
