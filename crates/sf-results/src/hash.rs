//! Content-based hashing for run IDs.

use sha2::{Digest, Sha256};

use crate::types::{RunId, RunInputs};

pub fn compute_run_key(inputs: &RunInputs) -> RunId {
    let mut hasher = Sha256::new();

    let params_json = serde_json::to_string(&inputs.parameters).unwrap_or_default();
    hasher.update(params_json.as_bytes());

    let solver_json = serde_json::to_string(&inputs.solver).unwrap_or_default();
    hasher.update(solver_json.as_bytes());

    hasher.update(inputs.solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
