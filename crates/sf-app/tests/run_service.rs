//! Integration tests for the run service: memoization, storage and sweeps.

use std::path::PathBuf;

use sf_app::{
    AppError, RunOptions, RunRequest, RunService, RunSource, ScenarioFile, SweepAxis,
    run_simulation,
};
use sf_core::SimulationParameters;
use sf_results::RunStore;
use sf_sim::SolverOptions;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dir.push(format!("{prefix}_{}_{nanos}", std::process::id()));
    dir
}

fn short_request() -> RunRequest {
    let mut parameters = SimulationParameters::default();
    parameters.ground_motion.duration = 10.0;
    RunRequest {
        parameters,
        options: RunOptions::default(),
    }
}

#[test]
fn reference_run_is_aligned() {
    let run = run_simulation(&SimulationParameters::default(), &SolverOptions::default())
        .expect("reference run should succeed");

    assert_eq!(run.record.len(), 2000);
    assert_eq!(run.response.len(), 2000);
    assert_eq!(run.record.time(), run.response.time.as_slice());
    assert!((run.pga() - 0.6).abs() < 1e-9);
    assert!((run.descriptors.omega_n - 20.0_f64.sqrt()).abs() < 1e-12);
    assert_eq!(run.to_timeseries().len(), 2000);
}

#[test]
fn invalid_mass_fails_before_numerics() {
    let mut params = SimulationParameters::default();
    params.structure.mass = 0.0;
    let err = run_simulation(&params, &SolverOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::InvalidParameter(_)));
}

#[test]
fn solver_failure_maps_to_solver_error() {
    let solver = SolverOptions {
        max_steps: 5,
        ..SolverOptions::default()
    };
    let err = run_simulation(&SimulationParameters::default(), &solver).unwrap_err();
    assert!(matches!(err, AppError::Solver(_)), "got {err:?}");
}

#[test]
fn second_request_hits_memory_cache() {
    let service = RunService::new();
    let request = short_request();

    let first = service.ensure_run(&request).unwrap();
    assert_eq!(first.source, RunSource::Computed);
    assert!(!first.loaded_from_cache());

    let second = service.ensure_run(&request).unwrap();
    assert_eq!(second.source, RunSource::Memory);
    assert_eq!(first.run_id, second.run_id);

    let a = first.run.unwrap();
    let b = second.run.unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(service.cache().len(), 1);
}

#[test]
fn disabling_cache_recomputes() {
    let service = RunService::new();
    let mut request = short_request();
    request.options.use_cache = false;

    let first = service.ensure_run(&request).unwrap();
    let second = service.ensure_run(&request).unwrap();
    assert_eq!(first.source, RunSource::Computed);
    assert_eq!(second.source, RunSource::Computed);
    assert_eq!(
        first.run.unwrap().response,
        second.run.unwrap().response
    );
}

#[test]
fn stored_run_is_served_from_disk() {
    let dir = unique_temp_dir("sf_app_store");
    let request = short_request();

    let writer = RunService::with_store(RunStore::new(dir.clone()).unwrap());
    let computed = writer.ensure_run(&request).unwrap();
    assert_eq!(computed.source, RunSource::Computed);

    let reader = RunService::with_store(RunStore::new(dir.clone()).unwrap());
    let loaded = reader.ensure_run(&request).unwrap();
    assert_eq!(loaded.source, RunSource::Disk);
    assert!(loaded.run.is_none());
    assert_eq!(loaded.manifest.sample_count, 1000);

    let series = reader.timeseries(&loaded).unwrap();
    let expected = computed.run.unwrap().to_timeseries();
    assert_eq!(series.len(), expected.len());
    for (got, want) in series.iter().zip(&expected) {
        assert!((got.time_s - want.time_s).abs() < 1e-12);
        assert!((got.displacement_m - want.displacement_m).abs() < 1e-12);
        assert!((got.total_energy_j - want.total_energy_j).abs() < 1e-12);
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn different_seed_is_a_different_run() {
    let service = RunService::new();
    let a = short_request();
    let mut b = short_request();
    b.parameters.ground_motion.seed = 42;

    let ra = service.ensure_run(&a).unwrap();
    let rb = service.ensure_run(&b).unwrap();
    assert_ne!(ra.run_id, rb.run_id);
    assert_eq!(rb.source, RunSource::Computed);
}

#[test]
fn sweep_keeps_order_and_isolates_failures() {
    let service = RunService::new();
    let mut base = SimulationParameters::default();
    base.ground_motion.duration = 5.0;

    let values = [10.0, 0.0, 40.0];
    let points = service.sweep(&base, SweepAxis::Stiffness, &values, &SolverOptions::default());

    assert_eq!(points.len(), 3);
    for (point, value) in points.iter().zip(values) {
        assert_eq!(point.value, value);
    }
    assert!(points[0].outcome.is_ok());
    assert!(points[1].outcome.is_err());
    assert!(points[2].outcome.is_ok());

    let soft = points[0].outcome.as_ref().unwrap();
    let stiff = points[2].outcome.as_ref().unwrap();
    assert!(soft.descriptors.natural_period_s > stiff.descriptors.natural_period_s);
    assert_eq!(soft.pga, stiff.pga);
}

#[test]
fn sweep_caches_summaries_not_series() {
    let service = RunService::new();
    let mut base = SimulationParameters::default();
    base.ground_motion.duration = 5.0;
    let values = [10.0, 0.0, 40.0];

    service.sweep(&base, SweepAxis::Stiffness, &values, &SolverOptions::default());
    assert!(service.cache().is_empty());
    assert_eq!(service.summary_cache().len(), 2);

    let again = service.sweep(&base, SweepAxis::Stiffness, &values, &SolverOptions::default());
    assert_eq!(service.summary_cache().hits(), 2);
    assert_eq!(service.summary_cache().len(), 2);
    assert!(again[1].outcome.is_err());
}

#[test]
fn scenario_file_drives_a_run() {
    let scenario =
        ScenarioFile::from_yaml_str("ground_motion:\n  duration: 4.0\n  intensity: 2.0\n").unwrap();
    let run = run_simulation(&scenario.parameters(), &scenario.solver).unwrap();
    assert_eq!(run.response.len(), 400);
    assert!((run.pga() - 1.2).abs() < 1e-9);
}
