//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Scalar field arithmetic for integration: add states, scale by scalar
/// - A weighted error norm for adaptive step control
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Takes &mut self so models may keep evaluation counters or caches.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// RMS of `err` weighted component-wise by
    /// `atol + rtol * max(|x_old|, |x_new|)`.
    fn error_norm(
        &self,
        err: &Self::State,
        x_old: &Self::State,
        x_new: &Self::State,
        atol: f64,
        rtol: f64,
    ) -> f64;

    /// True when every component of `x` is finite.
    fn is_finite(&self, x: &Self::State) -> bool;
}
