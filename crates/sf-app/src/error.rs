//! Error types for the sf-app service layer.

use std::path::PathBuf;

use sf_motion::MotionError;
use sf_sim::SimError;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read scenario file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scenario file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Ground motion error: {0}")]
    GroundMotion(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sf_core::SfError> for AppError {
    fn from(err: sf_core::SfError) -> Self {
        AppError::InvalidParameter(err.to_string())
    }
}

impl From<MotionError> for AppError {
    fn from(err: MotionError) -> Self {
        match err {
            MotionError::InvalidParameter(inner) => inner.into(),
            other => AppError::GroundMotion(other.to_string()),
        }
    }
}

impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        match err {
            SimError::InvalidParameter(inner) => inner.into(),
            other => AppError::Solver(other.to_string()),
        }
    }
}

impl From<sf_results::ResultsError> for AppError {
    fn from(err: sf_results::ResultsError) -> Self {
        match err {
            sf_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            err @ sf_results::ResultsError::InvalidRunId { .. } => {
                AppError::InvalidInput(err.to_string())
            }
            other => AppError::Results(other.to_string()),
        }
    }
}
