//! Transient response of a linear SDOF structure under ground excitation.
//!
//! Provides:
//! - TransientModel trait with the SDOF equation of motion as its model
//! - Adaptive Dormand-Prince RK45 and fixed-step RK4 integrators
//! - Grid-aligned output with linearly interpolated forcing
//! - Derived acceleration, energies and peak response

pub mod error;
pub mod forcing;
pub mod integrator;
pub mod model;
pub mod response;
pub mod sdof;
pub mod sim;
pub mod solve;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use forcing::SampledForce;
pub use integrator::{DormandPrince45, Integrator, RK4};
pub use model::TransientModel;
pub use response::{Peak, PeakResponse, StructuralResponse, gradient};
pub use sdof::{SdofModel, SdofState};
pub use sim::{IntegrationStats, IntegratorType, SimRecord, SolverOptions, integrate_on_grid};
pub use solve::{solve, solve_with_options};
