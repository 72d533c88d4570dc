//! Gaussian amplitude envelope centred mid-record.

/// `exp(-((t - T/2) / (T/4))²)`
#[inline]
pub fn gaussian_envelope(t: f64, duration: f64) -> f64 {
    let centre = duration / 2.0;
    let half_width = duration / 4.0;
    (-((t - centre) / half_width).powi(2)).exp()
}

/// Multiply the envelope into `signal` sample by sample.
pub fn apply_envelope(signal: &mut [f64], times: &[f64], duration: f64) {
    for (value, &t) in signal.iter_mut().zip(times) {
        *value *= gaussian_envelope(t, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_at_centre() {
        assert_eq!(gaussian_envelope(10.0, 20.0), 1.0);
    }

    #[test]
    fn e_inverse_at_half_width() {
        let v = gaussian_envelope(15.0, 20.0);
        assert!((v - (-1.0_f64).exp()).abs() < 1e-15);
        assert!((gaussian_envelope(5.0, 20.0) - v).abs() < 1e-15);
    }

    #[test]
    fn tapers_record_ends() {
        let edge = gaussian_envelope(0.0, 20.0);
        assert!((edge - (-4.0_f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn apply_scales_in_place() {
        let mut signal = vec![2.0, 2.0];
        apply_envelope(&mut signal, &[10.0, 15.0], 20.0);
        assert_eq!(signal[0], 2.0);
        assert!((signal[1] - 2.0 * (-1.0_f64).exp()).abs() < 1e-15);
    }
}
