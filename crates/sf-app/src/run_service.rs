//! Run execution and caching service.

use std::sync::Arc;
use std::time::Instant;

use sf_core::{DynamicDescriptors, SimulationParameters};
use sf_motion::{GroundMotionRecord, SynthesisOptions, synthesize_with_options};
use sf_results::{
    ResponseCache, RunInputs, RunManifest, RunStore, TimeseriesRecord, compute_run_key,
    timestamp_now,
};
use sf_sim::{PeakResponse, SolverOptions, StructuralResponse, solve_with_options};

use crate::error::AppResult;
use crate::sweep::SweepSummary;

/// Version string mixed into run keys; bump when numerics change.
pub const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One complete run: inputs, intermediate record and response.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub parameters: SimulationParameters,
    pub descriptors: DynamicDescriptors,
    pub record: GroundMotionRecord,
    pub response: StructuralResponse,
    pub peaks: PeakResponse,
}

impl SimulationRun {
    pub fn pga(&self) -> f64 {
        self.record.pga()
    }

    pub fn to_timeseries(&self) -> Vec<TimeseriesRecord> {
        let r = &self.response;
        (0..r.len())
            .map(|i| TimeseriesRecord {
                time_s: r.time[i],
                ground_accel_mps2: self.record.acceleration()[i],
                displacement_m: r.displacement[i],
                velocity_mps: r.velocity[i],
                accel_mps2: r.acceleration[i],
                kinetic_energy_j: r.kinetic_energy[i],
                potential_energy_j: r.potential_energy[i],
                total_energy_j: r.total_energy[i],
            })
            .collect()
    }
}

/// Synthesize the record and solve the response. Pure: equal inputs give
/// equal outputs. Parameters are validated before any numerics run.
pub fn run_simulation(
    params: &SimulationParameters,
    solver: &SolverOptions,
) -> AppResult<SimulationRun> {
    params.validate()?;
    solver.validate()?;

    let synth_opts = SynthesisOptions {
        dt: solver.dt,
        ..SynthesisOptions::default()
    };
    let record = synthesize_with_options(&params.ground_motion, &synth_opts)?;
    let response = solve_with_options(
        &params.structure,
        params.ground_motion.duration,
        record.acceleration(),
        solver,
    )?;
    let peaks = response.peaks();

    Ok(SimulationRun {
        parameters: *params,
        descriptors: params.structure.descriptors(),
        record,
        response,
        peaks,
    })
}

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver: SolverOptions,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver: SolverOptions::default(),
            solver_version: SOLVER_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub parameters: SimulationParameters,
    pub options: RunOptions,
}

impl RunRequest {
    pub fn inputs(&self) -> RunInputs {
        RunInputs {
            parameters: self.parameters,
            solver: self.options.solver,
            solver_version: self.options.solver_version.clone(),
        }
    }
}

/// Where a run's results came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSource {
    Computed,
    Memory,
    Disk,
}

/// Concise timing summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compute_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub source: RunSource,
    /// Present unless the run was served from disk.
    pub run: Option<Arc<SimulationRun>>,
    pub timing: RunTimingSummary,
}

impl RunResponse {
    pub fn loaded_from_cache(&self) -> bool {
        self.source != RunSource::Computed
    }
}

/// Memoizing front end to [`run_simulation`], optionally backed by a
/// [`RunStore`].
#[derive(Default)]
pub struct RunService {
    cache: ResponseCache<SimulationRun>,
    /// Sweep points keep only their scalar summary.
    pub(crate) summaries: ResponseCache<SweepSummary>,
    store: Option<RunStore>,
}

impl RunService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: RunStore) -> Self {
        Self {
            cache: ResponseCache::new(),
            summaries: ResponseCache::new(),
            store: Some(store),
        }
    }

    pub fn store(&self) -> Option<&RunStore> {
        self.store.as_ref()
    }

    pub fn cache(&self) -> &ResponseCache<SimulationRun> {
        &self.cache
    }

    pub fn summary_cache(&self) -> &ResponseCache<SweepSummary> {
        &self.summaries
    }

    /// Execute or load a run based on request.
    pub fn ensure_run(&self, request: &RunRequest) -> AppResult<RunResponse> {
        let started = Instant::now();
        let mut timing = RunTimingSummary::default();
        let inputs = request.inputs();
        let run_id = compute_run_key(&inputs);

        if request.options.use_cache {
            if let Some(run) = self.cache.get(&run_id) {
                tracing::info!(run_id = %run_id, "run served from memory cache");
                let manifest = build_manifest(&run_id, &inputs, &run);
                timing.total_time_s = started.elapsed().as_secs_f64();
                return Ok(RunResponse {
                    run_id,
                    manifest,
                    source: RunSource::Memory,
                    run: Some(run),
                    timing,
                });
            }

            if let Some(store) = &self.store
                && store.has_run(&run_id)
            {
                let load_started = Instant::now();
                let manifest = store.load_manifest(&run_id)?;
                timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
                timing.total_time_s = started.elapsed().as_secs_f64();
                tracing::info!(run_id = %run_id, "run served from disk store");
                return Ok(RunResponse {
                    run_id,
                    manifest,
                    source: RunSource::Disk,
                    run: None,
                    timing,
                });
            }
        }

        let compute_started = Instant::now();
        let run = if request.options.use_cache {
            self.cache
                .get_or_try_insert_with(&run_id, || {
                    run_simulation(&request.parameters, &request.options.solver)
                })?
                .0
        } else {
            Arc::new(run_simulation(
                &request.parameters,
                &request.options.solver,
            )?)
        };
        timing.compute_time_s = compute_started.elapsed().as_secs_f64();

        let manifest = build_manifest(&run_id, &inputs, &run);
        if let Some(store) = &self.store {
            let save_started = Instant::now();
            store.save_run(&manifest, &run.to_timeseries())?;
            timing.save_time_s = save_started.elapsed().as_secs_f64();
        }
        timing.total_time_s = started.elapsed().as_secs_f64();

        tracing::info!(
            run_id = %run_id,
            samples = manifest.sample_count,
            compute_s = timing.compute_time_s,
            "run completed"
        );
        Ok(RunResponse {
            run_id,
            manifest,
            source: RunSource::Computed,
            run: Some(run),
            timing,
        })
    }

    /// Time series for a response, from memory or the store.
    pub fn timeseries(&self, response: &RunResponse) -> AppResult<Vec<TimeseriesRecord>> {
        match (&response.run, &self.store) {
            (Some(run), _) => Ok(run.to_timeseries()),
            (None, Some(store)) => Ok(store.load_timeseries(&response.run_id)?),
            (None, None) => Err(crate::AppError::RunNotFound(response.run_id.clone())),
        }
    }
}

fn build_manifest(run_id: &str, inputs: &RunInputs, run: &SimulationRun) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        timestamp: timestamp_now(),
        inputs: inputs.clone(),
        sample_count: run.response.len(),
        peak_ground_acceleration: run.pga(),
        peaks: run.peaks,
    }
}
