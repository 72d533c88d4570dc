//! Result data types.

use serde::{Deserialize, Serialize};
use sf_core::SimulationParameters;
use sf_sim::{PeakResponse, SolverOptions};

pub type RunId = String;

/// Everything a run's output depends on. Two runs with equal inputs produce
/// identical results, so this is the memoization key material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInputs {
    pub parameters: SimulationParameters,
    pub solver: SolverOptions,
    pub solver_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub timestamp: String,
    pub inputs: RunInputs,
    pub sample_count: usize,
    pub peak_ground_acceleration: f64,
    pub peaks: PeakResponse,
}

/// One grid sample of a stored run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    pub ground_accel_mps2: f64,
    pub displacement_m: f64,
    pub velocity_mps: f64,
    pub accel_mps2: f64,
    pub kinetic_energy_j: f64,
    pub potential_energy_j: f64,
    pub total_energy_j: f64,
}
