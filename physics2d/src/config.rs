// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! World and solver configuration

use crate::error::PhysicsError;

/// Tunables for the sequential-impulse solver
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Number of solve sweeps over all constraints per tick
    pub iterations: usize,
    /// Baumgarte factor for joints
    pub joint_beta: f64,
    /// Squared-distance error a joint tolerates before correcting
    pub joint_slack: f64,
    /// Bound on a joint's cached multiplier, applied after solving
    pub joint_lambda_limit: f64,
    /// Baumgarte factor for contacts
    pub penetration_beta: f64,
    /// Penetration depth a contact tolerates before correcting
    pub penetration_slack: f64,
    /// Fold `-e * v_rel·n` into the contact bias so bodies bounce
    pub restitution_bias: bool,
    /// Carry contact multipliers over to the next tick
    pub warm_start_contacts: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            iterations: 10,
            joint_beta: 0.02,
            joint_slack: 0.01,
            joint_lambda_limit: 10_000.0,
            penetration_beta: 0.2,
            penetration_slack: 0.01,
            restitution_bias: false,
            warm_start_contacts: false,
        }
    }
}

impl SolverConfig {
    /// Set the number of solver sweeps
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Enable restitution in the contact bias
    pub fn with_restitution_bias(mut self) -> Self {
        self.restitution_bias = true;
        self
    }

    /// Enable warm starting of contact constraints across ticks
    pub fn with_contact_warm_starting(mut self) -> Self {
        self.warm_start_contacts = true;
        self
    }

    /// Check every value for range and finiteness
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.iterations == 0 {
            return Err(PhysicsError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }

        let non_negative = [
            ("joint_beta", self.joint_beta),
            ("joint_slack", self.joint_slack),
            ("joint_lambda_limit", self.joint_lambda_limit),
            ("penetration_beta", self.penetration_beta),
            ("penetration_slack", self.penetration_slack),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(PhysicsError::InvalidConfig(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Global simulation parameters
///
/// # Examples
///
/// ```
/// use physics2d::config::WorldConfig;
///
/// let config = WorldConfig::default().with_gravity(0.0);
/// assert!(config.validate().is_ok());
/// assert!(config.validate_timestep(1.0 / 60.0).is_ok());
/// assert!(config.validate_timestep(0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// Gravitational acceleration in m/s², applied along +Y
    pub gravity: f64,
    /// Conversion from meters to pixels
    pub pixels_per_meter: f64,
    /// Solver tunables
    pub solver: SolverConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            gravity: 9.8,
            pixels_per_meter: 50.0,
            solver: SolverConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Set the gravity scalar
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the pixels-per-meter conversion
    pub fn with_pixels_per_meter(mut self, pixels_per_meter: f64) -> Self {
        self.pixels_per_meter = pixels_per_meter;
        self
    }

    /// Replace the solver configuration
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Check every value for range and finiteness
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !(self.pixels_per_meter > 0.0 && self.pixels_per_meter.is_finite()) {
            return Err(PhysicsError::InvalidConfig(format!(
                "pixels_per_meter must be positive and finite, got {}",
                self.pixels_per_meter
            )));
        }
        self.solver.validate()
    }

    /// Check a timestep for stability
    ///
    /// Extremely small timesteps lose precision and large ones make the
    /// Baumgarte bias diverge, so both are reported alongside invalid values.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidTimestep`] if `dt` is not positive and
    /// finite, below `1e-9`, or above `1.0`.
    pub fn validate_timestep(&self, dt: f64) -> Result<(), PhysicsError> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(PhysicsError::InvalidTimestep {
                dt,
                reason: "must be positive and finite",
            });
        }

        if dt < 1e-9 {
            return Err(PhysicsError::InvalidTimestep {
                dt,
                reason: "extremely small, precision loss likely",
            });
        }

        if dt > 1.0 {
            return Err(PhysicsError::InvalidTimestep {
                dt,
                reason: "large enough to destabilize the solver",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.gravity, 9.8);
        assert_eq!(config.pixels_per_meter, 50.0);
        assert_eq!(config.solver.iterations, 10);
        assert!(!config.solver.restitution_bias);
        assert!(!config.solver.warm_start_contacts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = WorldConfig::default()
            .with_gravity(0.0)
            .with_pixels_per_meter(100.0)
            .with_solver(SolverConfig::default().with_iterations(4).with_restitution_bias());
        assert_eq!(config.gravity, 0.0);
        assert_eq!(config.pixels_per_meter, 100.0);
        assert_eq!(config.solver.iterations, 4);
        assert!(config.solver.restitution_bias);
    }

    #[test]
    fn test_invalid_values() {
        let config = WorldConfig::default().with_pixels_per_meter(0.0);
        assert!(matches!(config.validate(), Err(PhysicsError::InvalidConfig(_))));

        let config = WorldConfig::default().with_gravity(f64::NAN);
        assert!(config.validate().is_err());

        let config = WorldConfig::default().with_solver(SolverConfig::default().with_iterations(0));
        assert!(config.validate().is_err());

        let mut solver = SolverConfig::default();
        solver.penetration_beta = -0.1;
        let err = solver.validate().unwrap_err();
        assert!(err.to_string().contains("penetration_beta"));
    }

    #[test]
    fn test_timestep_validation() {
        let config = WorldConfig::default();
        assert!(config.validate_timestep(1.0 / 60.0).is_ok());
        assert!(config.validate_timestep(0.0).is_err());
        assert!(config.validate_timestep(-0.01).is_err());
        assert!(config.validate_timestep(f64::NAN).is_err());
        assert!(config.validate_timestep(f64::INFINITY).is_err());
        assert!(config.validate_timestep(1e-12).is_err());
        assert!(config.validate_timestep(2.0).is_err());
    }
}
