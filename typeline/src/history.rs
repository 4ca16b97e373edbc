use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use derive_more::From;
use platen::{StatsRecord, StatsSink};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, From, Error)]
pub enum StatsError {
    #[error("Failed to write statistics: {0}")]
    Io(std::io::Error),

    #[error("Failed to serialize statistics: {0}")]
    Serialize(serde_json::Error),
}

/// Appends one JSON object per finished session to a file
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsSink for JsonLinesSink {
    type Error = StatsError;

    fn append(&mut self, record: &StatsRecord) -> Result<(), Self::Error> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        // One write per record keeps lines whole
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?
            .write_all(&line)?;

        debug!(path = %self.path.display(), wpm = record.wpm, "statistics appended");
        Ok(())
    }
}
