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
//! Error type for fallible between-tick operations
//!
//! The simulation tick itself never fails; only calls that build or edit the
//! world (adding bodies, registering joints, validating configuration) report
//! a [`PhysicsError`].

use std::fmt;

/// Errors reported by world construction and editing
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PhysicsError {
    /// The body handle is stale or was never issued by this world
    InvalidBody(String),
    /// The constraint handle is stale or was never issued by this world
    InvalidConstraint(String),
    /// A constraint was asked to connect a body to itself
    SameBody(String),
    /// Mass is negative, NaN or infinite
    InvalidMass(f64),
    /// Circle radius is not positive and finite
    InvalidRadius(f64),
    /// Polygon has fewer than 3 vertices, no area or a non-convex outline
    DegeneratePolygon {
        /// Number of vertices supplied
        vertices: usize,
    },
    /// Timestep is not usable for integration
    InvalidTimestep {
        /// The rejected timestep
        dt: f64,
        /// Why it was rejected
        reason: &'static str,
    },
    /// A configuration value is out of range
    InvalidConfig(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBody(handle) => write!(f, "invalid body handle {handle}"),
            Self::InvalidConstraint(handle) => write!(f, "invalid constraint handle {handle}"),
            Self::SameBody(handle) => {
                write!(f, "constraint connects body {handle} to itself")
            }
            Self::InvalidMass(mass) => {
                write!(f, "invalid mass {mass}: must be non-negative and finite")
            }
            Self::InvalidRadius(radius) => {
                write!(f, "invalid radius {radius}: must be positive and finite")
            }
            Self::DegeneratePolygon { vertices } => write!(
                f,
                "degenerate polygon with {vertices} vertices: needs at least 3, non-zero area and a convex outline"
            ),
            Self::InvalidTimestep { dt, reason } => write!(f, "invalid timestep {dt}: {reason}"),
            Self::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for PhysicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PhysicsError::InvalidMass(-1.0);
        assert_eq!(err.to_string(), "invalid mass -1: must be non-negative and finite");

        let err = PhysicsError::DegeneratePolygon { vertices: 2 };
        assert!(err.to_string().contains("2 vertices"));

        let err = PhysicsError::InvalidRadius(-2.0);
        assert_eq!(err.to_string(), "invalid radius -2: must be positive and finite");
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&PhysicsError::InvalidConfig("iterations must be > 0".into()));
    }
}
