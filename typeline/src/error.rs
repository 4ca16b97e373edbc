use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;
use crate::history::StatsError;
use crate::source::SourceError;

#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(ConfigError),

    #[error("{0}")]
    Source(SourceError),

    #[error("{0}")]
    Stats(StatsError),

    #[error("Invalid layout settings: {0}")]
    Layout(platen::ConfigError),

    #[error("No practice text given")]
    #[from(skip)]
    MissingPath,

    #[error("The practice text is empty once whitespace is removed")]
    #[from(skip)]
    EmptyText,

    #[error("Terminal error: {0}")]
    Terminal(std::io::Error),
}
