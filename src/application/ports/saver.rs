//! Artifact save port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::ExportArtifact;

/// Save errors
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    #[error("Failed to create output directory: {0}")]
    CreateDirFailed(String),

    #[error("Failed to write file: {0}")]
    WriteFailed(String),
}

/// Port for handing a finished artifact to the host environment
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist the artifact under its file name.
    ///
    /// # Returns
    /// The path the artifact was written to
    async fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf, SaveError>;
}
