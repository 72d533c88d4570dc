//! sf-results: run keys, in-memory memoization and on-disk run storage.

pub mod cache;
pub mod hash;
pub mod store;
pub mod types;

pub use cache::ResponseCache;
pub use hash::compute_run_key;
pub use store::{RunStore, is_run_key, timestamp_now};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid run id: {run_id:?} (expected a 64-character hex key)")]
    InvalidRunId { run_id: String },
}
