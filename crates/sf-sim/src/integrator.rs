//! Time integrators: fixed-step RK4 and embedded Dormand-Prince 5(4).

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for fixed-step time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

// Dormand-Prince tableau.
const C: [f64; 6] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];
const A: [[f64; 5]; 6] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
    ],
];
const B: [f64; 6] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];
// Difference between the 5th and embedded 4th order weights; the last entry
// multiplies the derivative at the new point.
const E: [f64; 7] = [
    -71.0 / 57600.0,
    0.0,
    71.0 / 16695.0,
    -71.0 / 1920.0,
    17253.0 / 339200.0,
    -22.0 / 525.0,
    1.0 / 40.0,
];

/// Order of the embedded error estimator.
pub const ERROR_ESTIMATOR_ORDER: f64 = 4.0;

/// Outcome of one trial step.
#[derive(Clone, Debug)]
pub struct TrialStep<S> {
    pub x_new: S,
    /// Derivative at the new point, reusable as the next step's first stage.
    pub f_new: S,
    pub error_norm: f64,
}

/// Explicit Runge-Kutta 5(4) pair with error control.
#[derive(Clone, Copy, Debug)]
pub struct DormandPrince45 {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for DormandPrince45 {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
        }
    }
}

impl DormandPrince45 {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// Attempt a step of size `h` from `(t, x)` given `f0 = f(t, x)`.
    pub fn attempt<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        f0: &M::State,
        h: f64,
    ) -> SimResult<TrialStep<M::State>> {
        let mut k: Vec<M::State> = Vec::with_capacity(7);
        k.push(f0.clone());

        for s in 1..6 {
            let mut dx = model.scale(&k[0], A[s][0] * h);
            for (j, kj) in k.iter().enumerate().take(s).skip(1) {
                dx = model.add(&dx, &model.scale(kj, A[s][j] * h));
            }
            let xs = model.add(x, &dx);
            k.push(model.rhs(t + C[s] * h, &xs)?);
        }

        let mut incr = model.scale(&k[0], B[0] * h);
        for (s, ks) in k.iter().enumerate().skip(1) {
            incr = model.add(&incr, &model.scale(ks, B[s] * h));
        }
        let x_new = model.add(x, &incr);
        let f_new = model.rhs(t + h, &x_new)?;
        k.push(f_new.clone());

        let mut err = model.scale(&k[0], E[0] * h);
        for (s, ks) in k.iter().enumerate().skip(1) {
            err = model.add(&err, &model.scale(ks, E[s] * h));
        }
        let error_norm = model.error_norm(&err, x, &x_new, self.atol, self.rtol);

        Ok(TrialStep {
            x_new,
            f_new,
            error_norm,
        })
    }

    /// Starting step size from the local derivative scale
    /// (Hairer, Nørsett & Wanner, Solving ODEs I, sec. II.4).
    pub fn initial_step<M: TransientModel>(
        &self,
        model: &mut M,
        t0: f64,
        x0: &M::State,
        f0: &M::State,
    ) -> SimResult<f64> {
        let zero = model.scale(x0, 0.0);
        let d0 = model.error_norm(x0, x0, &zero, self.atol, self.rtol);
        let d1 = model.error_norm(f0, x0, &zero, self.atol, self.rtol);

        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };

        let x1 = model.add(x0, &model.scale(f0, h0));
        let f1 = model.rhs(t0 + h0, &x1)?;
        let df = model.add(&f1, &model.scale(f0, -1.0));
        let d2 = model.error_norm(&df, x0, &zero, self.atol, self.rtol) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / (ERROR_ESTIMATOR_ORDER + 1.0))
        };

        Ok((100.0 * h0).min(h1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimResult;

    /// x' = -x, exact solution e^{-t}.
    struct Decay;

    impl TransientModel for Decay {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            Ok(-x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }

        fn error_norm(&self, err: &f64, x_old: &f64, x_new: &f64, atol: f64, rtol: f64) -> f64 {
            (err / (atol + rtol * x_old.abs().max(x_new.abs()))).abs()
        }

        fn is_finite(&self, x: &f64) -> bool {
            x.is_finite()
        }
    }

    #[test]
    fn tableau_rows_sum_to_nodes() {
        for s in 0..6 {
            let row: f64 = A[s].iter().sum();
            assert!((row - C[s]).abs() < 1e-14, "row {s}");
        }
        let b: f64 = B.iter().sum();
        assert!((b - 1.0).abs() < 1e-14);
        let e: f64 = E.iter().sum();
        assert!(e.abs() < 1e-14);
    }

    #[test]
    fn rk4_step_accuracy() {
        let x = RK4.step(&mut Decay, 0.0, &1.0, 0.1).unwrap();
        assert!((x - (-0.1_f64).exp()).abs() < 1e-6);
    }

    #[test]
    fn dormand_prince_step_accuracy() {
        let dp = DormandPrince45::default();
        let trial = dp.attempt(&mut Decay, 0.0, &1.0, &-1.0, 0.1).unwrap();
        assert!((trial.x_new - (-0.1_f64).exp()).abs() < 1e-8);
        assert!((trial.f_new + trial.x_new).abs() < 1e-15);
        assert!(trial.error_norm < 1.0);
    }

    #[test]
    fn large_step_is_flagged() {
        let dp = DormandPrince45::new(1e-10, 1e-12);
        let trial = dp.attempt(&mut Decay, 0.0, &1.0, &-1.0, 2.0).unwrap();
        assert!(trial.error_norm > 1.0);
    }

    #[test]
    fn initial_step_is_positive_and_small() {
        let dp = DormandPrince45::default();
        let h = dp.initial_step(&mut Decay, 0.0, &1.0, &-1.0).unwrap();
        assert!(h > 0.0 && h < 1.0);
    }
}
