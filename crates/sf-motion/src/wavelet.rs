//! Ricker wavelets and the phase-arrival table of the synthetic record.

use std::f64::consts::PI;

/// Ricker ("Mexican hat") wavelet at time `t` for arrival `t0` and peak
/// frequency `f0` (Hz): `(1 - 2a)·exp(-a)` with `a = (π·f0·(t - t0))²`.
#[inline]
pub fn ricker(t: f64, t0: f64, f0: f64) -> f64 {
    let tau = t - t0;
    let a = (PI * f0 * tau).powi(2);
    (1.0 - 2.0 * a) * (-a).exp()
}

/// One weighted pulse whose arrival scales with the record duration:
/// `arrival = duration * num / den + offset_s`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RickerPulse {
    pub weight: f64,
    pub arrival_num: f64,
    pub arrival_den: f64,
    pub offset_s: f64,
    pub peak_frequency_hz: f64,
}

impl RickerPulse {
    pub const fn new(
        weight: f64,
        arrival_num: f64,
        arrival_den: f64,
        offset_s: f64,
        peak_frequency_hz: f64,
    ) -> Self {
        Self {
            weight,
            arrival_num,
            arrival_den,
            offset_s,
            peak_frequency_hz,
        }
    }

    pub fn arrival(&self, duration: f64) -> f64 {
        duration * self.arrival_num / self.arrival_den + self.offset_s
    }

    /// Weighted contribution at `t` for a record of `duration` seconds.
    #[inline]
    pub fn eval(&self, t: f64, duration: f64) -> f64 {
        self.weight * ricker(t, self.arrival(duration), self.peak_frequency_hz)
    }
}

/// Five phase arrivals: three early pulses bracketing T/3, a long-period
/// pulse at T/2 and a late pulse at 2T/3.
pub static PHASE_PULSES: [RickerPulse; 5] = [
    RickerPulse::new(0.8, 1.0, 3.0, -5.0, 1.0),
    RickerPulse::new(1.2, 1.0, 3.0, 0.0, 2.5),
    RickerPulse::new(0.6, 1.0, 3.0, 5.0, 4.0),
    RickerPulse::new(0.3, 1.0, 2.0, 0.0, 1.2),
    RickerPulse::new(0.4, 2.0, 3.0, 0.0, 3.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ricker_peaks_at_arrival() {
        assert_eq!(ricker(3.0, 3.0, 2.0), 1.0);
        assert!(ricker(3.1, 3.0, 2.0) < 1.0);
    }

    #[test]
    fn ricker_is_symmetric_and_decays() {
        let left = ricker(2.8, 3.0, 1.5);
        let right = ricker(3.2, 3.0, 1.5);
        assert!((left - right).abs() < 1e-15);
        assert!(ricker(30.0, 3.0, 1.5).abs() < 1e-12);
    }

    #[test]
    fn ricker_zero_crossing() {
        // (1 - 2a) = 0 at tau = 1 / (π f0 √2)
        let f0 = 2.5;
        let tau = 1.0 / (PI * f0 * 2.0_f64.sqrt());
        assert!(ricker(tau, 0.0, f0).abs() < 1e-12);
    }

    #[test]
    fn arrivals_for_twenty_second_record() {
        let arrivals: Vec<f64> = PHASE_PULSES.iter().map(|p| p.arrival(20.0)).collect();
        assert!((arrivals[0] - (20.0 / 3.0 - 5.0)).abs() < 1e-12);
        assert!((arrivals[1] - 20.0 / 3.0).abs() < 1e-12);
        assert!((arrivals[2] - (20.0 / 3.0 + 5.0)).abs() < 1e-12);
        assert_eq!(arrivals[3], 10.0);
        assert!((arrivals[4] - 40.0 / 3.0).abs() < 1e-12);
    }
}
