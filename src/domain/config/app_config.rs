//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default prebuilt voice used for synthesis
pub const DEFAULT_VOICE: &str = "Charon";

/// Default Gemini model used for synthesis
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub voice: Option<String>,
    pub model: Option<String>,
    pub output_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            voice: Some(DEFAULT_VOICE.to_string()),
            model: Some(DEFAULT_MODEL.to_string()),
            output_dir: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            voice: other.voice.or(self.voice),
            model: other.model.or(self.model),
            output_dir: other.output_dir.or(self.output_dir),
        }
    }

    /// Get the voice, or the default if not set
    pub fn voice_or_default(&self) -> &str {
        self.voice.as_deref().unwrap_or(DEFAULT_VOICE)
    }

    /// Get the model, or the default if not set
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Get the output directory, or the current directory if not set
    pub fn output_dir_or_default(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(".")
    }
}
