//! Ground-acceleration record sampled on a uniform grid.

use sf_core::{TimeGrid, ensure_finite, max_abs};

use crate::error::MotionResult;

/// Ground acceleration (m/s²) aligned with `time`.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundMotionRecord {
    grid: TimeGrid,
    time: Vec<f64>,
    acceleration: Vec<f64>,
}

impl GroundMotionRecord {
    /// Wrap externally produced samples. Length and finiteness are checked.
    pub fn from_samples(grid: TimeGrid, acceleration: Vec<f64>) -> MotionResult<Self> {
        grid.check_len("ground acceleration", acceleration.len())?;
        for &a in &acceleration {
            ensure_finite(a, "ground acceleration")?;
        }
        Ok(Self::from_parts(grid, acceleration))
    }

    /// All-zero record: a structure at rest stays at rest.
    pub fn quiet(grid: TimeGrid) -> Self {
        Self::from_parts(grid, vec![0.0; grid.len()])
    }

    pub(crate) fn from_parts(grid: TimeGrid, acceleration: Vec<f64>) -> Self {
        Self {
            time: grid.times(),
            grid,
            acceleration,
        }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn duration(&self) -> f64 {
        self.grid.duration()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn acceleration(&self) -> &[f64] {
        &self.acceleration
    }

    pub fn len(&self) -> usize {
        self.acceleration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acceleration.is_empty()
    }

    /// Peak ground acceleration, max |a_g| (m/s²).
    pub fn pga(&self) -> f64 {
        max_abs(&self.acceleration)
    }

    /// Split into `(time, acceleration)` arrays.
    pub fn into_arrays(self) -> (Vec<f64>, Vec<f64>) {
        (self.time, self.acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MotionError;

    #[test]
    fn from_samples_checks_length() {
        let grid = TimeGrid::new(1.0).unwrap();
        let err = GroundMotionRecord::from_samples(grid, vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, MotionError::InvalidParameter(_)));
    }

    #[test]
    fn from_samples_rejects_nan() {
        let grid = TimeGrid::new(0.02).unwrap();
        assert!(GroundMotionRecord::from_samples(grid, vec![0.0, f64::NAN]).is_err());
    }

    #[test]
    fn quiet_record_has_zero_pga() {
        let record = GroundMotionRecord::quiet(TimeGrid::new(2.0).unwrap());
        assert_eq!(record.len(), 200);
        assert_eq!(record.time().len(), 200);
        assert_eq!(record.pga(), 0.0);
    }
}
