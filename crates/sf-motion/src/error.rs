//! Error types for ground-motion synthesis.

use sf_core::SfError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] SfError),

    #[error("Degenerate signal: peak amplitude is zero, cannot normalize")]
    DegenerateSignal,
}

pub type MotionResult<T> = Result<T, MotionError>;
