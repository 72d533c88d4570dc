//! Error types for response computation.

use sf_core::SfError;
use thiserror::Error;

/// Errors encountered while solving the structural response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] SfError),

    #[error("Convergence failed: {message}")]
    ConvergenceFailed { message: String },

    #[error("Non-finite {what} at t = {time} s")]
    NonFinite { what: &'static str, time: f64 },
}

impl SimError {
    /// True for failures raised by the integrator itself, as opposed to
    /// inputs rejected before integration started.
    pub fn is_solver_failure(&self) -> bool {
        !matches!(self, SimError::InvalidParameter(_))
    }
}

pub type SimResult<T> = Result<T, SimError>;
