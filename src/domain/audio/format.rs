//! Export format selector

use std::fmt;
use std::str::FromStr;

/// Audio export formats offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Uncompressed RIFF/WAVE
    Wav,
    /// MPEG-1 Layer III
    Mp3,
    /// AAC in an M4A container
    M4a,
}

impl ExportFormat {
    /// All formats, in menu order
    pub const ALL: [ExportFormat; 3] = [Self::Wav, Self::Mp3, Self::M4a];

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
        }
    }

    /// Get the MIME type string
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::M4a => "audio/mp4",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wav => "WAV",
            Self::Mp3 => "MP3",
            Self::M4a => "M4A",
        };
        write!(f, "{}", name)
    }
}

/// Error when parsing a format name
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid format: \"{input}\". Valid formats are: wav, mp3, m4a")]
pub struct FormatParseError {
    pub input: String,
}

impl FromStr for ExportFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            "m4a" | "aac" => Ok(Self::M4a),
            _ => Err(FormatParseError {
                input: s.to_string(),
            }),
        }
    }
}
