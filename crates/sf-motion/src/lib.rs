//! Synthetic ground-motion records.
//!
//! Provides:
//! - Ricker wavelet pulses modelling seismic phase arrivals
//! - Gaussian amplitude envelope (onset/coda taper)
//! - Seeded background noise
//! - Peak normalization to the requested intensity

pub mod envelope;
pub mod error;
pub mod record;
pub mod synth;
pub mod wavelet;

pub use error::{MotionError, MotionResult};
pub use record::GroundMotionRecord;
pub use synth::{SynthesisOptions, normalize_to_peak, synthesize, synthesize_with_options};
pub use wavelet::{PHASE_PULSES, RickerPulse, ricker};
