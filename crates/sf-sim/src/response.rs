//! Structural response series and the quantities derived from them.

/// Response of the structure on the record grid.
///
/// Every series has the same length as `time`.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuralResponse {
    /// Time points (s)
    pub time: Vec<f64>,
    /// Relative displacement x(t) (m)
    pub displacement: Vec<f64>,
    /// Relative velocity v(t) (m/s)
    pub velocity: Vec<f64>,
    /// Finite-difference derivative of `velocity` (m/s²)
    pub acceleration: Vec<f64>,
    /// ½·m·v² (J)
    pub kinetic_energy: Vec<f64>,
    /// ½·k·x² (J)
    pub potential_energy: Vec<f64>,
    /// Kinetic + potential (J)
    pub total_energy: Vec<f64>,
}

impl StructuralResponse {
    /// Assemble the response from grid-sampled displacement and velocity.
    pub(crate) fn from_states(
        time: Vec<f64>,
        displacement: Vec<f64>,
        velocity: Vec<f64>,
        dt: f64,
        mass: f64,
        stiffness: f64,
    ) -> Self {
        let acceleration = gradient(&velocity, dt);
        let kinetic_energy: Vec<f64> = velocity.iter().map(|v| 0.5 * mass * v * v).collect();
        let potential_energy: Vec<f64> = displacement
            .iter()
            .map(|x| 0.5 * stiffness * x * x)
            .collect();
        let total_energy = kinetic_energy
            .iter()
            .zip(&potential_energy)
            .map(|(ke, pe)| ke + pe)
            .collect();

        Self {
            time,
            displacement,
            velocity,
            acceleration,
            kinetic_energy,
            potential_energy,
            total_energy,
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn peaks(&self) -> PeakResponse {
        PeakResponse {
            displacement: Peak::abs_max(&self.time, &self.displacement),
            velocity: Peak::abs_max(&self.time, &self.velocity),
            acceleration: Peak::abs_max(&self.time, &self.acceleration),
            total_energy: Peak::abs_max(&self.time, &self.total_energy),
        }
    }
}

/// Derivative of uniformly sampled `values`: central differences inside,
/// first-order one-sided differences at both ends.
pub fn gradient(values: &[f64], dt: f64) -> Vec<f64> {
    let n = values.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut out = Vec::with_capacity(n);
            out.push((values[1] - values[0]) / dt);
            for i in 1..n - 1 {
                out.push((values[i + 1] - values[i - 1]) / (2.0 * dt));
            }
            out.push((values[n - 1] - values[n - 2]) / dt);
            out
        }
    }
}

/// Largest magnitude in a series and when it first occurs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Peak {
    pub value: f64,
    pub time: f64,
}

impl Peak {
    pub fn abs_max(time: &[f64], values: &[f64]) -> Self {
        let mut peak = Peak::default();
        for (&t, &v) in time.iter().zip(values) {
            if v.abs() > peak.value {
                peak = Peak {
                    value: v.abs(),
                    time: t,
                };
            }
        }
        peak
    }
}

/// Peak magnitudes of a response.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakResponse {
    pub displacement: Peak,
    pub velocity: Peak,
    pub acceleration: Peak,
    pub total_energy: Peak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_of_line_is_constant() {
        let v: Vec<f64> = (0..5).map(|i| 3.0 * i as f64 * 0.1).collect();
        for g in gradient(&v, 0.1) {
            assert!((g - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn gradient_edges_are_one_sided() {
        let g = gradient(&[0.0, 1.0, 4.0, 9.0], 1.0);
        assert_eq!(g, vec![1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn gradient_short_inputs() {
        assert!(gradient(&[], 0.01).is_empty());
        assert_eq!(gradient(&[2.0], 0.01), vec![0.0]);
        assert_eq!(gradient(&[0.0, 0.02], 0.01), vec![2.0, 2.0]);
    }

    #[test]
    fn energies_follow_states() {
        let r = StructuralResponse::from_states(
            vec![0.0, 1.0],
            vec![0.1, -0.2],
            vec![2.0, -1.0],
            1.0,
            2.0,
            10.0,
        );
        assert_eq!(r.kinetic_energy, vec![4.0, 1.0]);
        assert!((r.potential_energy[0] - 0.05).abs() < 1e-15);
        assert!((r.potential_energy[1] - 0.2).abs() < 1e-15);
        assert!((r.total_energy[1] - 1.2).abs() < 1e-15);
        assert_eq!(r.acceleration, vec![-3.0, -3.0]);
    }

    #[test]
    fn peak_reports_first_largest_magnitude() {
        let peak = Peak::abs_max(&[0.0, 1.0, 2.0, 3.0], &[0.5, -2.0, 2.0, 1.0]);
        assert_eq!(peak.value, 2.0);
        assert_eq!(peak.time, 1.0);
        assert_eq!(Peak::abs_max(&[0.0], &[0.0]), Peak::default());
    }
}
