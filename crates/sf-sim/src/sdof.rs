//! Linear single-degree-of-freedom oscillator as a transient model.

use nalgebra::Vector2;
use sf_core::Structure;

use crate::error::SimResult;
use crate::forcing::SampledForce;
use crate::model::TransientModel;

/// State `[x, v]`: relative displacement (m) and velocity (m/s).
pub type SdofState = Vector2<f64>;

/// `m·ẍ + c·ẋ + k·x = F(t)` written as `ẋ = v`, `v̇ = (F - c·v - k·x) / m`.
#[derive(Clone, Debug)]
pub struct SdofModel {
    mass: f64,
    damping: f64,
    stiffness: f64,
    force: SampledForce,
    rhs_calls: usize,
}

impl SdofModel {
    pub fn new(structure: &Structure, force: SampledForce) -> Self {
        Self {
            mass: structure.mass,
            damping: structure.damping,
            stiffness: structure.stiffness,
            force,
            rhs_calls: 0,
        }
    }

    /// Number of right-hand side evaluations so far.
    pub fn rhs_calls(&self) -> usize {
        self.rhs_calls
    }

    /// Acceleration implied by the equation of motion at `(t, x, v)`.
    pub fn acceleration(&self, t: f64, x: f64, v: f64) -> f64 {
        (self.force.at(t) - self.damping * v - self.stiffness * x) / self.mass
    }
}

impl TransientModel for SdofModel {
    type State = SdofState;

    fn initial_state(&self) -> SdofState {
        SdofState::zeros()
    }

    fn rhs(&mut self, t: f64, x: &SdofState) -> SimResult<SdofState> {
        self.rhs_calls += 1;
        Ok(SdofState::new(x[1], self.acceleration(t, x[0], x[1])))
    }

    fn add(&self, a: &SdofState, b: &SdofState) -> SdofState {
        a + b
    }

    fn scale(&self, a: &SdofState, scale: f64) -> SdofState {
        a * scale
    }

    fn error_norm(
        &self,
        err: &SdofState,
        x_old: &SdofState,
        x_new: &SdofState,
        atol: f64,
        rtol: f64,
    ) -> f64 {
        let sum_sq: f64 = (0..2)
            .map(|i| {
                let scale = atol + rtol * x_old[i].abs().max(x_new[i].abs());
                (err[i] / scale).powi(2)
            })
            .sum();
        (sum_sq / 2.0).sqrt()
    }

    fn is_finite(&self, x: &SdofState) -> bool {
        x.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(c: f64) -> SdofModel {
        SdofModel::new(
            &Structure::new(2.0, c, 8.0),
            SampledForce::new(0.01, vec![4.0, 4.0]),
        )
    }

    #[test]
    fn rhs_matches_equation_of_motion() {
        let mut m = model(1.0);
        let dx = m.rhs(0.0, &SdofState::new(0.5, -1.0)).unwrap();
        assert_eq!(dx[0], -1.0);
        // (4 - 1·(-1) - 8·0.5) / 2
        assert_eq!(dx[1], 0.5);
        assert_eq!(m.rhs_calls(), 1);
    }

    #[test]
    fn starts_at_rest() {
        assert_eq!(model(0.0).initial_state(), SdofState::zeros());
    }

    #[test]
    fn error_norm_is_weighted_rms() {
        let m = model(0.0);
        let zero = SdofState::zeros();
        let err = SdofState::new(1e-6, 1e-6);
        let norm = m.error_norm(&err, &zero, &zero, 1e-6, 1e-3);
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn detects_non_finite_state() {
        let m = model(0.0);
        assert!(m.is_finite(&SdofState::new(1.0, 2.0)));
        assert!(!m.is_finite(&SdofState::new(f64::NAN, 2.0)));
        assert!(!m.is_finite(&SdofState::new(1.0, f64::INFINITY)));
    }
}
