//! Export artifact value object

use super::format::ExportFormat;

/// Fixed suffix appended to export file names
pub const FILE_SUFFIX: &str = "voice";

/// A finished export: named binary data ready to be saved.
/// Created on demand by an encoder and discarded after saving.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    file_name: String,
    format: ExportFormat,
    data: Vec<u8>,
}

impl ExportArtifact {
    /// Create an artifact named from a sanitized title stem:
    /// `<stem>_voice.<ext>`
    pub fn named(stem: &str, format: ExportFormat, data: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}_{}.{}", stem, FILE_SUFFIX, format.extension()),
            format,
            data,
        }
    }

    /// Get the target file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the export format
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Get the binary contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Format a byte count for display
pub fn human_readable_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_artifact_file_name() {
        let artifact = ExportArtifact::named("winter_night", ExportFormat::Mp3, vec![1, 2, 3]);
        assert_eq!(artifact.file_name(), "winter_night_voice.mp3");
        assert_eq!(artifact.format(), ExportFormat::Mp3);
        assert_eq!(artifact.mime_type(), "audio/mpeg");
        assert_eq!(artifact.size_bytes(), 3);
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(human_readable_size(500), "500 B");
        assert_eq!(human_readable_size(2048), "2.0 KB");
        assert_eq!(human_readable_size(2 * 1024 * 1024), "2.0 MB");
    }
}
