//! One-parameter sweeps executed in parallel.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rayon::prelude::*;
use sf_core::{DynamicDescriptors, SimulationParameters};
use sf_results::{RunInputs, compute_run_key};
use sf_sim::{PeakResponse, SolverOptions};

use crate::error::{AppError, AppResult};
use crate::run_service::{RunService, SOLVER_VERSION, run_simulation};

/// Input varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAxis {
    Mass,
    Damping,
    Stiffness,
    Intensity,
    Duration,
}

impl SweepAxis {
    pub const ALL: [SweepAxis; 5] = [
        SweepAxis::Mass,
        SweepAxis::Damping,
        SweepAxis::Stiffness,
        SweepAxis::Intensity,
        SweepAxis::Duration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SweepAxis::Mass => "mass",
            SweepAxis::Damping => "damping",
            SweepAxis::Stiffness => "stiffness",
            SweepAxis::Intensity => "intensity",
            SweepAxis::Duration => "duration",
        }
    }

    /// Copy of `base` with this input set to `value`.
    pub fn apply(self, base: &SimulationParameters, value: f64) -> SimulationParameters {
        let mut params = *base;
        match self {
            SweepAxis::Mass => params.structure.mass = value,
            SweepAxis::Damping => params.structure.damping = value,
            SweepAxis::Stiffness => params.structure.stiffness = value,
            SweepAxis::Intensity => params.ground_motion.intensity = value,
            SweepAxis::Duration => params.ground_motion.duration = value,
        }
        params
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SweepAxis {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SweepAxis::ALL
            .into_iter()
            .find(|axis| axis.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::InvalidInput(format!("unknown sweep axis: {s}")))
    }
}

/// Scalar outcome of one sweep point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSummary {
    pub descriptors: DynamicDescriptors,
    pub pga: f64,
    pub peaks: PeakResponse,
}

/// One point of a sweep; failures are kept per point.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub value: f64,
    pub outcome: Result<SweepSummary, String>,
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

impl RunService {
    /// Run `base` once per value of `axis`. Points run in parallel and are
    /// returned in the order of `values`.
    pub fn sweep(
        &self,
        base: &SimulationParameters,
        axis: SweepAxis,
        values: &[f64],
        solver: &SolverOptions,
    ) -> Vec<SweepPoint> {
        let points: Vec<SweepPoint> = values
            .par_iter()
            .map(|&value| {
                let params = axis.apply(base, value);
                let outcome = self
                    .summarize(&params, solver)
                    .map(|summary| *summary)
                    .map_err(|e| e.to_string());
                SweepPoint { value, outcome }
            })
            .collect();

        let failed = points.iter().filter(|p| p.outcome.is_err()).count();
        tracing::info!(
            axis = %axis,
            points = points.len(),
            failed,
            "sweep finished"
        );
        points
    }

    /// Memoized summary of one point. The full series are dropped as soon
    /// as the summary is taken, and nothing is written to the store.
    fn summarize(
        &self,
        params: &SimulationParameters,
        solver: &SolverOptions,
    ) -> AppResult<Arc<SweepSummary>> {
        let key = compute_run_key(&RunInputs {
            parameters: *params,
            solver: *solver,
            solver_version: SOLVER_VERSION.to_string(),
        });
        let (summary, _) = self.summaries.get_or_try_insert_with(&key, || {
            run_simulation(params, solver).map(|run| SweepSummary {
                descriptors: run.descriptors,
                pga: run.pga(),
                peaks: run.peaks,
            })
        })?;
        Ok(summary)
    }
}
