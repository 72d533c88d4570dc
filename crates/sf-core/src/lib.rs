//! sf-core: stable foundation for seismoflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - grid (uniform sample grid shared by every series of a run)
//! - params (structure and ground-motion inputs, dynamic descriptors)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod params;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SfError, SfResult};
pub use grid::{DEFAULT_DT, TimeGrid};
pub use numeric::*;
pub use params::{
    DampingRegime, DynamicDescriptors, GroundMotionParams, SimulationParameters, Structure,
};
