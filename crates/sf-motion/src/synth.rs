//! Ground-motion synthesis: pulses → envelope → noise → normalization.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use sf_core::{DEFAULT_DT, GroundMotionParams, TimeGrid, ensure_positive, max_abs};

use crate::envelope::apply_envelope;
use crate::error::{MotionError, MotionResult};
use crate::record::GroundMotionRecord;
use crate::wavelet::{PHASE_PULSES, RickerPulse};

/// Options for record synthesis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthesisOptions {
    /// Sampling step (seconds)
    pub dt: f64,
    /// Standard deviation of the additive background noise
    pub noise_scale: f64,
    /// Peak |a_g| per unit intensity (m/s²)
    pub peak_per_intensity: f64,
    /// Phase arrivals superposed before enveloping
    pub pulses: &'static [RickerPulse],
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            noise_scale: 0.05,
            peak_per_intensity: 0.6,
            pulses: &PHASE_PULSES,
        }
    }
}

/// Synthesize a record of `duration` seconds whose peak ground acceleration
/// is `0.6 * intensity`. Output is a pure function of the arguments.
pub fn synthesize(duration: f64, intensity: f64, seed: u64) -> MotionResult<GroundMotionRecord> {
    synthesize_with_options(
        &GroundMotionParams::new(duration, intensity, seed),
        &SynthesisOptions::default(),
    )
}

pub fn synthesize_with_options(
    params: &GroundMotionParams,
    opts: &SynthesisOptions,
) -> MotionResult<GroundMotionRecord> {
    params.validate()?;
    ensure_positive(opts.peak_per_intensity, "peak_per_intensity")?;
    let grid = TimeGrid::with_step(params.duration, opts.dt)?;
    let times = grid.times();

    let mut signal = superpose_pulses(opts.pulses, &times, params.duration);
    apply_envelope(&mut signal, &times, params.duration);
    add_noise(&mut signal, params.seed, opts.noise_scale);

    let target_peak = opts.peak_per_intensity * params.intensity;
    match normalize_to_peak(&mut signal, target_peak) {
        Ok(()) => {}
        Err(MotionError::DegenerateSignal) => {
            tracing::warn!(
                seed = params.seed,
                duration = params.duration,
                "synthesized signal is identically zero; returning a quiet record"
            );
            signal.iter_mut().for_each(|v| *v = 0.0);
        }
        Err(e) => return Err(e),
    }

    tracing::debug!(
        samples = grid.len(),
        seed = params.seed,
        peak = target_peak,
        "ground motion synthesized"
    );
    Ok(GroundMotionRecord::from_parts(grid, signal))
}

/// Weighted sum of `pulses` at every sample time.
pub fn superpose_pulses(pulses: &[RickerPulse], times: &[f64], duration: f64) -> Vec<f64> {
    times
        .iter()
        .map(|&t| pulses.iter().map(|p| p.eval(t, duration)).sum())
        .collect()
}

/// Add `scale * N(0, 1)` noise from a generator owned by this call.
pub fn add_noise(signal: &mut [f64], seed: u64, scale: f64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for value in signal.iter_mut() {
        let z: f64 = rng.sample(StandardNormal);
        *value += scale * z;
    }
}

/// Rescale `signal` in place so that `max|signal| == peak`.
///
/// Leaves the signal untouched and reports [`MotionError::DegenerateSignal`]
/// when every sample is zero.
pub fn normalize_to_peak(signal: &mut [f64], peak: f64) -> MotionResult<()> {
    let current = max_abs(signal);
    if current == 0.0 {
        return Err(MotionError::DegenerateSignal);
    }
    for value in signal.iter_mut() {
        *value = *value / current * peak;
    }
    Ok(())
}
