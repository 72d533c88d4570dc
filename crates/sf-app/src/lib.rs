//! Shared application service layer for seismoflow.
//!
//! This crate sits between the pure numerical crates and the CLI: it loads
//! scenarios, runs synthesis + solve, memoizes results, persists runs and
//! executes parameter sweeps.

pub mod config;
pub mod error;
pub mod export;
pub mod run_service;
pub mod sweep;

// Re-export key types for convenience
pub use config::ScenarioFile;
pub use error::{AppError, AppResult};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, RunService, RunSource, RunTimingSummary, SimulationRun,
    run_simulation,
};
pub use sweep::{SweepAxis, SweepPoint, SweepSummary, linspace};
