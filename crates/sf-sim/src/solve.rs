//! Entry point: structural response to a ground-acceleration record.

use sf_core::{Structure, TimeGrid, ensure_finite};

use crate::error::SimResult;
use crate::forcing::SampledForce;
use crate::response::StructuralResponse;
use crate::sdof::SdofModel;
use crate::sim::{SolverOptions, integrate_on_grid};

/// Solve `m·ẍ + c·ẋ + k·x = -m·a_g(t)` from rest with default options.
///
/// `ground_acceleration` must hold one sample per grid time of `duration`.
pub fn solve(
    structure: &Structure,
    duration: f64,
    ground_acceleration: &[f64],
) -> SimResult<StructuralResponse> {
    solve_with_options(
        structure,
        duration,
        ground_acceleration,
        &SolverOptions::default(),
    )
}

pub fn solve_with_options(
    structure: &Structure,
    duration: f64,
    ground_acceleration: &[f64],
    opts: &SolverOptions,
) -> SimResult<StructuralResponse> {
    // Every input is checked before the integrator runs.
    structure.validate()?;
    opts.validate()?;
    let grid = TimeGrid::with_step(duration, opts.dt)?;
    grid.check_len("ground acceleration", ground_acceleration.len())?;
    for &a in ground_acceleration {
        ensure_finite(a, "ground acceleration")?;
    }

    let force = SampledForce::seismic(structure.mass, grid.dt(), ground_acceleration);
    let mut model = SdofModel::new(structure, force);
    let record = integrate_on_grid(&mut model, &grid, opts)?;

    let (displacement, velocity): (Vec<f64>, Vec<f64>) =
        record.x.iter().map(|s| (s[0], s[1])).unzip();

    let response = StructuralResponse::from_states(
        record.t,
        displacement,
        velocity,
        grid.dt(),
        structure.mass,
        structure.stiffness,
    );

    tracing::debug!(
        samples = response.len(),
        rhs_calls = model.rhs_calls(),
        accepted = record.stats.accepted_steps,
        rejected = record.stats.rejected_steps,
        "structural response solved"
    );
    Ok(response)
}
