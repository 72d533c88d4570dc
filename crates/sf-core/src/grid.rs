//! Uniform sample grid shared by a ground-motion record and its response.

use crate::error::{SfError, SfResult};
use crate::numeric::{Real, ensure_positive};

/// Sampling interval of every series (seconds).
pub const DEFAULT_DT: Real = 0.01;

/// Relative slack applied before flooring `duration / dt`, so that decimal
/// durations such as 0.3 s yield 30 samples instead of 29.
const LEN_SLACK: Real = 1e-9;

/// Half-open grid `t_i = i·dt` for `i in 0..len`, covering `[0, duration)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    duration: Real,
    dt: Real,
    len: usize,
}

impl TimeGrid {
    /// Build the grid for a run of `duration` seconds at the default step.
    pub fn new(duration: Real) -> SfResult<Self> {
        Self::with_step(duration, DEFAULT_DT)
    }

    /// Build the grid for an explicit sampling step.
    ///
    /// Requires at least two samples; the finite-difference acceleration
    /// downstream is undefined for shorter series.
    pub fn with_step(duration: Real, dt: Real) -> SfResult<Self> {
        ensure_positive(duration, "duration")?;
        ensure_positive(dt, "dt")?;

        let raw = duration / dt;
        let len = (raw + raw * LEN_SLACK).floor() as usize;
        if len < 2 {
            return Err(SfError::InvalidParameter {
                what: "duration",
                value: duration,
                constraint: "long enough for at least two samples",
            });
        }
        Ok(Self { duration, dt, len })
    }

    /// Duration the grid was built from (not necessarily `len * dt`).
    pub fn duration(&self) -> Real {
        self.duration
    }

    pub fn dt(&self) -> Real {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: construction rejects grids with fewer than two samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of sample `i`.
    #[inline]
    pub fn time(&self, i: usize) -> Real {
        i as Real * self.dt
    }

    /// Time of the final sample.
    pub fn last_time(&self) -> Real {
        self.time(self.len - 1)
    }

    pub fn times(&self) -> Vec<Real> {
        (0..self.len).map(|i| self.time(i)).collect()
    }

    /// Check that a series sampled on this grid has the right length.
    pub fn check_len(&self, what: &'static str, actual: usize) -> SfResult<()> {
        if actual == self.len {
            Ok(())
        } else {
            Err(SfError::LengthMismatch {
                what,
                expected: self.len,
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_seconds_has_two_thousand_samples() {
        let grid = TimeGrid::new(20.0).unwrap();
        assert_eq!(grid.len(), 2000);
        assert_eq!(grid.time(0), 0.0);
        assert!((grid.last_time() - 19.99).abs() < 1e-12);
    }

    #[test]
    fn decimal_duration_is_not_truncated() {
        assert_eq!(TimeGrid::new(0.3).unwrap().len(), 30);
        assert_eq!(TimeGrid::new(5.0).unwrap().len(), 500);
        assert_eq!(TimeGrid::new(0.025).unwrap().len(), 2);
    }

    #[test]
    fn rejects_degenerate_durations() {
        assert!(TimeGrid::new(0.0).is_err());
        assert!(TimeGrid::new(-1.0).is_err());
        assert!(TimeGrid::new(f64::NAN).is_err());
        assert!(TimeGrid::new(0.015).is_err());
    }

    #[test]
    fn check_len_reports_mismatch() {
        let grid = TimeGrid::new(1.0).unwrap();
        assert!(grid.check_len("record", 100).is_ok());
        let err = grid.check_len("record", 99).unwrap_err();
        assert_eq!(
            err,
            SfError::LengthMismatch {
                what: "record",
                expected: 100,
                actual: 99
            }
        );
    }

    #[test]
    fn times_are_uniform() {
        let grid = TimeGrid::new(0.1).unwrap();
        let t = grid.times();
        assert_eq!(t.len(), 10);
        for (i, ti) in t.iter().enumerate() {
            assert_eq!(*ti, i as f64 * DEFAULT_DT);
        }
    }
}
