use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Append a record for every finished session
    pub enabled: bool,
    /// JSON-lines file the records are appended to
    pub file: Option<PathBuf>,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}
