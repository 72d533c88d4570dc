//! External force sampled on the record grid.

/// Force samples `F_i` at `t_i = i·dt`, evaluated between samples by linear
/// interpolation and held constant beyond either end.
#[derive(Clone, Debug)]
pub struct SampledForce {
    dt: f64,
    values: Vec<f64>,
}

impl SampledForce {
    /// `values` must be non-empty and `dt` positive; the solver checks both
    /// before constructing one.
    pub fn new(dt: f64, values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty());
        debug_assert!(dt > 0.0);
        Self { dt, values }
    }

    /// Seismic forcing `F = -m·a_g` from ground acceleration samples.
    pub fn seismic(mass: f64, dt: f64, ground_acceleration: &[f64]) -> Self {
        Self::new(dt, ground_acceleration.iter().map(|a| -mass * a).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Force at an arbitrary time `t`.
    pub fn at(&self, t: f64) -> f64 {
        let last = self.values.len() - 1;
        if t <= 0.0 {
            return self.values[0];
        }
        let pos = t / self.dt;
        let idx = pos.floor() as usize;
        if idx >= last {
            return self.values[last];
        }
        let frac = (pos - idx as f64).clamp(0.0, 1.0);
        let (lo, hi) = (self.values[idx], self.values[idx + 1]);
        lo + frac * (hi - lo)
    }
}
