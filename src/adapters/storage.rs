use crate::domain::ports::ArtifactStorage;
use crate::utils::error::Result;
use crate::utils::validation::validate_token_file_name;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes token files into a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalArtifactStorage {
    base_path: PathBuf,
}

impl LocalArtifactStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ArtifactStorage for LocalArtifactStorage {
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<String> {
        validate_token_file_name(name)?;

        fs::create_dir_all(&self.base_path)?;
        let full_path = self.base_path.join(name);
        fs::write(&full_path, data)?;

        Ok(full_path.display().to_string())
    }
}
