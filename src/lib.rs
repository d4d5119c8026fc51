//! Aloud - text-to-speech playback and audio export CLI
//!
//! This crate reads a text passage aloud through Google Gemini
//! text-to-speech and exports the synthesized audio as WAV, MP3, or
//! M4A files.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: PCM/WAV codec utilities, value objects, and errors
//! - **Application**: The read-aloud use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, rodio, LAME, FDK AAC, filesystem)
//! - **CLI**: Command-line interface, argument parsing, and presentation

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
