//! Filesystem artifact store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{ArtifactStore, SaveError};
use crate::domain::audio::ExportArtifact;

/// Saves artifacts into a target directory
pub struct DirArtifactStore {
    dir: PathBuf,
}

impl DirArtifactStore {
    /// Create a store writing into the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store writing into the current directory
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Get the target directory
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl ArtifactStore for DirArtifactStore {
    async fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SaveError::CreateDirFailed(e.to_string()))?;

        let path = self.dir.join(artifact.file_name());
        fs::write(&path, artifact.data())
            .await
            .map_err(|e| SaveError::WriteFailed(e.to_string()))?;

        Ok(path)
    }
}
