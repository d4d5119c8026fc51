//! Audio domain: payload decoding, container construction, formats

pub mod artifact;
pub mod format;
pub mod pcm;
pub mod wav;

pub use artifact::{human_readable_size, ExportArtifact, FILE_SUFFIX};
pub use format::{ExportFormat, FormatParseError};
pub use pcm::{DecodeError, PcmAudio};
