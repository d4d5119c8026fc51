//! Speech synthesis adapters

pub mod gemini;

pub use gemini::GeminiSynthesizer;
