use std::path::PathBuf;
use thiserror::Error;
use trajhist::analysis::error::AnalysisError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot access input '{path}': {source}", path = path.display())]
    InputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Failures that are reported but do not make the run unsuccessful.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CliError::Core(AnalysisError::InvalidState(_)))
    }
}
