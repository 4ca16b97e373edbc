use std::path::{Path, PathBuf};

use platen::TextSource;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read practice text '{}': {error}", path.display())]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to save the remaining text to '{}': {error}", path.display())]
    Write {
        path: PathBuf,
        error: std::io::Error,
    },
}

/// Practice text read from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    type Error = SourceError;

    fn load(&mut self) -> Result<Vec<u8>, Self::Error> {
        let bytes = std::fs::read(&self.path).map_err(|error| SourceError::Read {
            path: self.path.clone(),
            error,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "practice text loaded");
        Ok(bytes)
    }

    fn save_remainder(&mut self, remainder: &[u8]) -> Result<(), Self::Error> {
        std::fs::write(&self.path, remainder).map_err(|error| SourceError::Write {
            path: self.path.clone(),
            error,
        })?;
        info!(path = %self.path.display(), bytes = remainder.len(), "remaining text saved");
        Ok(())
    }
}
