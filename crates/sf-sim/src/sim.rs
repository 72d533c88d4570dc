//! Grid-aligned integration drivers and solver options.

use sf_core::{DEFAULT_DT, SfError, TimeGrid, ensure_positive};

use crate::error::{SimError, SimResult};
use crate::integrator::{DormandPrince45, ERROR_ESTIMATOR_ORDER, Integrator, RK4};
use crate::model::TransientModel;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntegratorType {
    /// Adaptive Dormand-Prince 5(4) with error control (default).
    #[default]
    Rk45,
    /// Classical 4th-order Runge-Kutta at `max_step` (no error control).
    Rk4,
}

/// Options for response computation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverOptions {
    /// Integration method
    pub method: IntegratorType,
    /// Output grid step (seconds)
    pub dt: f64,
    /// Upper bound on the internal step (seconds)
    pub max_step: f64,
    /// Relative tolerance (RK45 only)
    pub rtol: f64,
    /// Absolute tolerance (RK45 only)
    pub atol: f64,
    /// Maximum number of attempted steps (accepted + rejected)
    pub max_steps: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            method: IntegratorType::default(),
            dt: DEFAULT_DT,
            max_step: DEFAULT_DT,
            rtol: 1e-3,
            atol: 1e-6,
            max_steps: 1_000_000,
        }
    }
}

impl SolverOptions {
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.dt, "dt")?;
        ensure_positive(self.max_step, "max_step")?;
        ensure_positive(self.rtol, "rtol")?;
        ensure_positive(self.atol, "atol")?;
        if self.max_steps == 0 {
            return Err(SfError::InvalidParameter {
                what: "max_steps",
                value: 0.0,
                constraint: "> 0",
            }
            .into());
        }
        Ok(())
    }
}

/// Counters collected during one integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
}

impl IntegrationStats {
    pub fn attempted(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

/// States sampled exactly at the grid times.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
    pub stats: IntegrationStats,
}

/// Integrate `model` from rest over `grid`, reporting the state at every
/// grid time. Internal steps never exceed `opts.max_step` and never cross a
/// grid time.
pub fn integrate_on_grid<M: TransientModel>(
    model: &mut M,
    grid: &TimeGrid,
    opts: &SolverOptions,
) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;
    let record = match opts.method {
        IntegratorType::Rk45 => run_adaptive(model, grid, opts)?,
        IntegratorType::Rk4 => run_fixed(model, grid, opts)?,
    };
    tracing::debug!(
        method = ?opts.method,
        accepted = record.stats.accepted_steps,
        rejected = record.stats.rejected_steps,
        samples = record.t.len(),
        "integration finished"
    );
    Ok(record)
}

fn run_fixed<M: TransientModel>(
    model: &mut M,
    grid: &TimeGrid,
    opts: &SolverOptions,
) -> SimResult<SimRecord<M::State>> {
    // Schedule is sized in f64 so a tiny max_step cannot overflow usize.
    let per_interval = (grid.dt() / opts.max_step).ceil().max(1.0);
    let total = per_interval * (grid.len() - 1) as f64;
    if !total.is_finite() || total > opts.max_steps as f64 {
        return Err(SimError::ConvergenceFailed {
            message: format!(
                "fixed-step schedule needs {total:.3e} steps, budget is {}",
                opts.max_steps
            ),
        });
    }
    let substeps = per_interval as usize;
    let mut stats = IntegrationStats::default();

    let mut x = model.initial_state();
    let mut t_record = Vec::with_capacity(grid.len());
    let mut x_record = Vec::with_capacity(grid.len());
    t_record.push(grid.time(0));
    x_record.push(x.clone());

    for i in 1..grid.len() {
        let t_start = grid.time(i - 1);
        let h = (grid.time(i) - t_start) / substeps as f64;
        for j in 0..substeps {
            x = RK4.step(model, t_start + j as f64 * h, &x, h)?;
            stats.accepted_steps += 1;
        }
        if !model.is_finite(&x) {
            return Err(SimError::NonFinite {
                what: "state",
                time: grid.time(i),
            });
        }
        t_record.push(grid.time(i));
        x_record.push(x.clone());
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
        stats,
    })
}

fn run_adaptive<M: TransientModel>(
    model: &mut M,
    grid: &TimeGrid,
    opts: &SolverOptions,
) -> SimResult<SimRecord<M::State>> {
    let dp = DormandPrince45::new(opts.rtol, opts.atol);
    let exponent = -1.0 / (ERROR_ESTIMATOR_ORDER + 1.0);
    let mut stats = IntegrationStats::default();

    let mut t = grid.time(0);
    let mut x = model.initial_state();
    let mut f = model.rhs(t, &x)?;
    let mut h_abs = dp.initial_step(model, t, &x, &f)?.min(opts.max_step);

    let mut t_record = Vec::with_capacity(grid.len());
    let mut x_record = Vec::with_capacity(grid.len());
    t_record.push(t);
    x_record.push(x.clone());

    for i in 1..grid.len() {
        let target = grid.time(i);
        while t < target {
            let mut rejected = false;
            loop {
                if stats.attempted() >= opts.max_steps {
                    return Err(SimError::ConvergenceFailed {
                        message: format!(
                            "step budget of {} exhausted at t = {t:.6} s",
                            opts.max_steps
                        ),
                    });
                }
                let min_step = 10.0 * (next_up(t) - t);
                if h_abs < min_step {
                    return Err(SimError::ConvergenceFailed {
                        message: format!(
                            "required step size {h_abs:.3e} is below float spacing at t = {t:.6} s"
                        ),
                    });
                }

                let remaining = target - t;
                let clipped = h_abs >= remaining;
                let h = if clipped { remaining } else { h_abs };
                let trial = dp.attempt(model, t, &x, &f, h)?;

                if trial.error_norm.is_finite() && trial.error_norm < 1.0 {
                    stats.accepted_steps += 1;
                    let mut factor = if trial.error_norm == 0.0 {
                        MAX_FACTOR
                    } else {
                        (SAFETY * trial.error_norm.powf(exponent)).min(MAX_FACTOR)
                    };
                    if rejected {
                        factor = factor.min(1.0);
                    }
                    let mut proposal = h * factor;
                    // Landing on a grid time shortens the step; do not let
                    // that shrink the next proposal.
                    if clipped {
                        proposal = proposal.max(h_abs);
                    }
                    h_abs = proposal.min(opts.max_step);

                    t = if clipped { target } else { t + h };
                    x = trial.x_new;
                    f = trial.f_new;
                    if !model.is_finite(&x) {
                        return Err(SimError::NonFinite { what: "state", time: t });
                    }
                    break;
                }

                stats.rejected_steps += 1;
                rejected = true;
                let factor = if trial.error_norm.is_finite() {
                    (SAFETY * trial.error_norm.powf(exponent)).max(MIN_FACTOR)
                } else {
                    MIN_FACTOR
                };
                h_abs = h * factor;
            }
        }
        t_record.push(target);
        x_record.push(x.clone());
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
        stats,
    })
}

/// Smallest representable float greater than `t` (t ≥ 0).
fn next_up(t: f64) -> f64 {
    if t == 0.0 {
        f64::from_bits(1)
    } else {
        f64::from_bits(t.to_bits() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_options_defaults() {
        let opts = SolverOptions::default();
        assert_eq!(opts.method, IntegratorType::Rk45);
        assert_eq!(opts.dt, 0.01);
        assert_eq!(opts.max_step, 0.01);
        assert_eq!(opts.rtol, 1e-3);
        assert_eq!(opts.atol, 1e-6);
    }

    #[test]
    fn solver_options_invalid() {
        let bad_step = SolverOptions {
            max_step: 0.0,
            ..SolverOptions::default()
        };
        assert!(matches!(
            bad_step.validate(),
            Err(SimError::InvalidParameter(_))
        ));
        let no_budget = SolverOptions {
            max_steps: 0,
            ..SolverOptions::default()
        };
        assert!(no_budget.validate().is_err());
    }

    #[test]
    fn next_up_is_strictly_greater() {
        assert!(next_up(0.0) > 0.0);
        assert!(next_up(1.0) > 1.0);
        assert_eq!(next_up(1.0) - 1.0, f64::EPSILON);
    }
}
