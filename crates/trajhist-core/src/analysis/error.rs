use super::config::ConfigError;
use crate::core::binning::error::BinningError;
use crate::core::io::error::{StoreError, TrajectoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Frame {index} requested but the trajectory only has {available} frame(s)")]
    Range { index: usize, available: usize },

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Particle species '{0}' does not occur in the reference frame")]
    UnknownSpecies(String),

    #[error("Trajectory error: {0}")]
    Trajectory(TrajectoryError),

    #[error("Binning error: {0}")]
    Binning(#[from] BinningError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Output error: {0}")]
    Output(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TrajectoryError> for AnalysisError {
    fn from(e: TrajectoryError) -> Self {
        match e {
            TrajectoryError::FrameOutOfRange { index, available } => {
                AnalysisError::Range { index, available }
            }
            other => AnalysisError::Trajectory(other),
        }
    }
}
