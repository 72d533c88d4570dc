//! YAML scenario files.
//!
//! Every section and field is optional; missing values take the defaults of
//! the reference scenario (m = 1 kg, c = 0.5 N·s/m, k = 20 N/m, T = 20 s,
//! intensity 1, seed 0, RK45 with Δt = 0.01 s).
//!
//! ```yaml
//! structure:
//!   mass: 2.0
//!   stiffness: 40.0
//! ground_motion:
//!   duration: 30.0
//!   seed: 7
//! solver:
//!   method: rk4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use sf_core::{GroundMotionParams, SimulationParameters, Structure};
use sf_sim::SolverOptions;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub structure: Structure,
    pub ground_motion: GroundMotionParams,
    pub solver: SolverOptions,
}

impl ScenarioFile {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Change the output step. The internal step cap follows it unless
    /// `max_step` is given as well.
    pub fn set_output_step(&mut self, dt: f64, max_step: Option<f64>) {
        self.solver.dt = dt;
        self.solver.max_step = max_step.unwrap_or(dt);
    }

    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            structure: self.structure,
            ground_motion: self.ground_motion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_sim::IntegratorType;

    #[test]
    fn empty_file_gives_reference_scenario() {
        let scenario = ScenarioFile::from_yaml_str("").unwrap();
        assert_eq!(scenario, ScenarioFile::default());
        assert_eq!(scenario.structure.stiffness, 20.0);
        assert_eq!(scenario.ground_motion.duration, 20.0);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let yaml = "structure:\n  mass: 2.0\nground_motion:\n  seed: 7\nsolver:\n  method: rk4\n";
        let scenario = ScenarioFile::from_yaml_str(yaml).unwrap();
        assert_eq!(scenario.structure.mass, 2.0);
        assert_eq!(scenario.structure.damping, 0.5);
        assert_eq!(scenario.ground_motion.seed, 7);
        assert_eq!(scenario.ground_motion.intensity, 1.0);
        assert_eq!(scenario.solver.method, IntegratorType::Rk4);
        assert_eq!(scenario.solver.max_step, 0.01);
    }

    #[test]
    fn yaml_round_trip() {
        let mut scenario = ScenarioFile::default();
        scenario.ground_motion.intensity = 2.5;
        let yaml = scenario.to_yaml().unwrap();
        assert_eq!(ScenarioFile::from_yaml_str(&yaml).unwrap(), scenario);
    }

    #[test]
    fn output_step_carries_the_step_cap() {
        let mut scenario = ScenarioFile::default();
        scenario.set_output_step(0.02, None);
        assert_eq!(scenario.solver.dt, 0.02);
        assert_eq!(scenario.solver.max_step, 0.02);

        scenario.set_output_step(0.02, Some(0.005));
        assert_eq!(scenario.solver.dt, 0.02);
        assert_eq!(scenario.solver.max_step, 0.005);
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = ScenarioFile::from_yaml_str("structure: [1, 2").unwrap_err();
        assert!(matches!(err, AppError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ScenarioFile::load(Path::new("/nonexistent/scenario.yaml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
