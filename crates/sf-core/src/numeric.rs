use crate::SfError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SfError::NonFinite { what, value: v })
    }
}

/// Require `v > 0` and finite.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, SfError> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(SfError::InvalidParameter {
            what,
            value: v,
            constraint: "finite and > 0",
        })
    }
}

/// Require `v >= 0` and finite.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, SfError> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(SfError::InvalidParameter {
            what,
            value: v,
            constraint: "finite and >= 0",
        })
    }
}

/// Largest absolute value in `values` (0 for an empty slice).
pub fn max_abs(values: &[Real]) -> Real {
    values.iter().fold(0.0, |acc: Real, v| acc.max(v.abs()))
}

/// Scale `values` so the largest magnitude becomes 1.
///
/// An all-zero input maps to all zeros.
pub fn normalized(values: &[Real]) -> Vec<Real> {
    let peak = max_abs(values);
    if peak == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / peak).collect()
}
