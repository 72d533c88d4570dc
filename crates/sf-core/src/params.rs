//! Run inputs and the scalar descriptors derived from them.

use std::f64::consts::PI;
use std::fmt;

use crate::error::SfResult;
use crate::numeric::{Real, ensure_non_negative, ensure_positive};
use crate::units::{self, AngularVelocity, Frequency, MassRate, Ratio, Time};

/// Half-width of the band around ζ = 1 treated as critically damped.
pub const CRITICAL_BAND: Real = 0.05;

/// Linear SDOF oscillator: mass (kg), viscous damping (N·s/m), stiffness (N/m).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Structure {
    pub mass: Real,
    pub damping: Real,
    pub stiffness: Real,
}

impl Default for Structure {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 0.5,
            stiffness: 20.0,
        }
    }
}

impl Structure {
    pub fn new(mass: Real, damping: Real, stiffness: Real) -> Self {
        Self {
            mass,
            damping,
            stiffness,
        }
    }

    pub fn validate(&self) -> SfResult<()> {
        ensure_positive(self.mass, "mass")?;
        ensure_non_negative(self.damping, "damping")?;
        ensure_positive(self.stiffness, "stiffness")?;
        Ok(())
    }

    /// Derive the modal descriptors. Call [`Structure::validate`] first;
    /// invalid inputs produce NaN or infinite descriptors.
    pub fn descriptors(&self) -> DynamicDescriptors {
        let omega_n = (self.stiffness / self.mass).sqrt();
        let critical_damping = 2.0 * (self.mass * self.stiffness).sqrt();
        DynamicDescriptors {
            omega_n,
            natural_frequency_hz: omega_n / (2.0 * PI),
            natural_period_s: 2.0 * PI / omega_n,
            critical_damping,
            damping_ratio: self.damping / critical_damping,
        }
    }
}

/// Synthetic record inputs: duration (s), intensity scale, noise seed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GroundMotionParams {
    pub duration: Real,
    pub intensity: Real,
    pub seed: u64,
}

impl Default for GroundMotionParams {
    fn default() -> Self {
        Self {
            duration: 20.0,
            intensity: 1.0,
            seed: 0,
        }
    }
}

impl GroundMotionParams {
    pub fn new(duration: Real, intensity: Real, seed: u64) -> Self {
        Self {
            duration,
            intensity,
            seed,
        }
    }

    pub fn validate(&self) -> SfResult<()> {
        ensure_positive(self.duration, "duration")?;
        ensure_positive(self.intensity, "intensity")?;
        Ok(())
    }
}

/// Complete input of one run. Fully determines the output at a fixed step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParameters {
    pub structure: Structure,
    pub ground_motion: GroundMotionParams,
}

impl SimulationParameters {
    pub fn validate(&self) -> SfResult<()> {
        self.structure.validate()?;
        self.ground_motion.validate()
    }
}

/// Scalar dynamic properties of a [`Structure`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicDescriptors {
    /// Natural angular frequency ω_n (rad/s)
    pub omega_n: Real,
    /// Natural frequency f_n (Hz)
    pub natural_frequency_hz: Real,
    /// Natural period T_n (s)
    pub natural_period_s: Real,
    /// Critical damping coefficient c_crit (N·s/m)
    pub critical_damping: Real,
    /// Damping ratio ζ
    pub damping_ratio: Real,
}

impl DynamicDescriptors {
    pub fn regime(&self) -> DampingRegime {
        DampingRegime::classify(self.damping_ratio)
    }

    pub fn angular_frequency(&self) -> AngularVelocity {
        units::rad_per_s(self.omega_n)
    }

    pub fn natural_frequency(&self) -> Frequency {
        units::hz(self.natural_frequency_hz)
    }

    pub fn natural_period(&self) -> Time {
        units::s(self.natural_period_s)
    }

    pub fn critical_damping_coefficient(&self) -> MassRate {
        units::kgps(self.critical_damping)
    }

    pub fn zeta(&self) -> Ratio {
        units::unitless(self.damping_ratio)
    }
}

/// One descriptor per line, each with its SI unit.
impl fmt::Display for DynamicDescriptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use uom::fmt::DisplayStyle::Abbreviation;
        use uom::si::angular_velocity::radian_per_second;
        use uom::si::frequency::hertz;
        use uom::si::mass_rate::kilogram_per_second;
        use uom::si::ratio::ratio;
        use uom::si::time::second;

        writeln!(
            f,
            "ω_n = {:.4}",
            self.angular_frequency()
                .into_format_args(radian_per_second, Abbreviation)
        )?;
        writeln!(
            f,
            "f_n = {:.4}",
            self.natural_frequency().into_format_args(hertz, Abbreviation)
        )?;
        writeln!(
            f,
            "T_n = {:.4}",
            self.natural_period().into_format_args(second, Abbreviation)
        )?;
        writeln!(
            f,
            "c_crit = {:.4}",
            self.critical_damping_coefficient()
                .into_format_args(kilogram_per_second, Abbreviation)
        )?;
        write!(f, "ζ = {:.4} ({})", self.zeta().get::<ratio>(), self.regime())
    }
}

/// Qualitative damping class of a structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DampingRegime {
    Undamped,
    Underdamped,
    CriticallyDamped,
    Overdamped,
}

impl DampingRegime {
    pub fn classify(zeta: Real) -> Self {
        if zeta == 0.0 {
            Self::Undamped
        } else if (zeta - 1.0).abs() <= CRITICAL_BAND {
            Self::CriticallyDamped
        } else if zeta < 1.0 {
            Self::Underdamped
        } else {
            Self::Overdamped
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Undamped => "undamped",
            Self::Underdamped => "underdamped",
            Self::CriticallyDamped => "critically damped",
            Self::Overdamped => "overdamped",
        }
    }
}

impl fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SfError;

    #[test]
    fn reference_structure_descriptors() {
        let d = Structure::new(1.0, 0.5, 20.0).descriptors();
        assert!((d.omega_n - 20.0_f64.sqrt()).abs() < 1e-12);
        assert!((d.omega_n - 4.472).abs() < 1e-3);
        assert!((d.natural_frequency_hz * d.natural_period_s - 1.0).abs() < 1e-12);
        assert!((d.critical_damping - 2.0 * 20.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(d.regime(), DampingRegime::Underdamped);
    }

    #[test]
    fn zero_damping_is_undamped() {
        let d = Structure::new(1.0, 0.0, 20.0).descriptors();
        assert_eq!(d.damping_ratio, 0.0);
        assert_eq!(d.regime(), DampingRegime::Undamped);
    }

    #[test]
    fn critical_damping_gives_unit_ratio() {
        let c = 2.0 * (1.0_f64 * 20.0).sqrt();
        let d = Structure::new(1.0, c, 20.0).descriptors();
        assert!((d.damping_ratio - 1.0).abs() < 1e-12);
        assert_eq!(d.regime(), DampingRegime::CriticallyDamped);
        assert_eq!(
            Structure::new(1.0, 3.0 * c, 20.0).descriptors().regime(),
            DampingRegime::Overdamped
        );
    }

    #[test]
    fn uom_views_match_raw_values() {
        use uom::si::frequency::hertz;
        use uom::si::time::second;

        let d = Structure::default().descriptors();
        assert_eq!(d.natural_frequency().get::<hertz>(), d.natural_frequency_hz);
        assert_eq!(d.natural_period().get::<second>(), d.natural_period_s);
    }

    #[test]
    fn display_lists_descriptors_with_units() {
        let text = Structure::default().descriptors().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("ω_n = 4.4721"));
        assert!(lines[0].ends_with("rad/s"));
        assert!(lines[1].ends_with("Hz"));
        assert!(lines[3].starts_with("c_crit = 8.9443"));
        assert!(lines[3].ends_with("kg/s"));
        assert_eq!(lines[4], "ζ = 0.0559 (underdamped)");
    }

    #[test]
    fn validation_rejects_bad_structures() {
        let err = Structure::new(0.0, 0.5, 20.0).validate().unwrap_err();
        assert!(matches!(
            err,
            SfError::InvalidParameter { what: "mass", .. }
        ));
        assert!(Structure::new(1.0, -0.1, 20.0).validate().is_err());
        assert!(Structure::new(1.0, 0.5, 0.0).validate().is_err());
        assert!(Structure::new(1.0, 0.0, 20.0).validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_ground_motion() {
        assert!(GroundMotionParams::new(0.0, 1.0, 0).validate().is_err());
        assert!(GroundMotionParams::new(20.0, 0.0, 0).validate().is_err());
        assert!(SimulationParameters::default().validate().is_ok());
    }
}
