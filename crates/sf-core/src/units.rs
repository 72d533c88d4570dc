// sf-core/src/units.rs
//! SI quantity views of the structural descriptors.

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, Frequency as UomFrequency, MassRate as UomMassRate,
    Ratio as UomRatio, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Frequency = UomFrequency;
/// Viscous damping coefficients (N·s/m) share the dimension of a mass rate (kg/s).
pub type MassRate = UomMassRate;
pub type Ratio = UomRatio;
pub type Time = UomTime;

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}
