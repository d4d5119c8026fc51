//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod read_aloud;

// Re-export use cases
pub use read_aloud::{PlaybackToggle, ReadAloudError, ReadAloudUseCase, SavedArtifact};
