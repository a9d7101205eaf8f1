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
//! Sequential-impulse constraints
//!
//! Each constraint expresses one or more velocity equations through a
//! Jacobian `J` over the stacked vector `[vAx, vAy, ωA, vBx, vBy, ωB]` and
//! solves
//!
//! ```text
//! (J M⁻¹ Jᵀ) λ = -J v - bias
//! ```
//!
//! with Gauss-Seidel, then applies the impulse `Jᵀ λ` to both bodies. The
//! world drives every constraint through the same three phases each tick:
//! [`Constraint::pre_solve`] once, [`Constraint::solve`] once per solver
//! iteration, [`Constraint::post_solve`] once.
//!
//! - [`JointConstraint`]: persistent pin joint, warm started across ticks
//! - [`PenetrationConstraint`]: contact with friction, rebuilt every tick

mod joint;
mod penetration;

pub use joint::JointConstraint;
pub use penetration::PenetrationConstraint;

use crate::body::RigidBody;
use crate::config::SolverConfig;
use crate::math::{MatMN, Vec2, VecN};
use crate::storage::BodyHandle;
use std::any::Any;

/// A velocity constraint between two bodies
///
/// The world looks up the two bodies named by [`Constraint::bodies`] and
/// passes them in the same order to every phase.
pub trait Constraint: Send + Sync {
    /// The constrained bodies, A then B
    fn bodies(&self) -> (BodyHandle, BodyHandle);

    /// Rebuild the Jacobian and bias for this tick, applying any warm-start
    /// impulse
    fn pre_solve(&mut self, a: &mut RigidBody, b: &mut RigidBody, dt: f64, config: &SolverConfig);

    /// Run one Gauss-Seidel pass and apply the corrective impulse
    fn solve(&mut self, a: &mut RigidBody, b: &mut RigidBody);

    /// Finish the tick after all solver iterations
    fn post_solve(&mut self, _config: &SolverConfig) {}

    /// Descriptive name for diagnostics
    fn name(&self) -> &str;

    /// Allow downcasting to the concrete constraint type
    fn as_any(&self) -> &dyn Any;
}

/// Block-diagonal inverse mass matrix of two bodies
pub(crate) fn inverse_mass_matrix(a: &RigidBody, b: &RigidBody) -> MatMN<6, 6> {
    MatMN::from_diagonal([
        a.inv_mass(),
        a.inv_mass(),
        a.inv_inertia(),
        b.inv_mass(),
        b.inv_mass(),
        b.inv_inertia(),
    ])
}

/// Stacked velocity vector of two bodies
pub(crate) fn velocities(a: &RigidBody, b: &RigidBody) -> VecN<6> {
    let (va, vb) = (a.velocity(), b.velocity());
    VecN::from_array([
        va.x,
        va.y,
        a.angular_velocity(),
        vb.x,
        vb.y,
        b.angular_velocity(),
    ])
}

/// Apply a stacked impulse vector to two bodies
pub(crate) fn apply_impulses(a: &mut RigidBody, b: &mut RigidBody, impulses: &VecN<6>) {
    a.apply_impulse_linear(Vec2::new(impulses[0], impulses[1]));
    a.apply_impulse_angular(impulses[2]);
    b.apply_impulse_linear(Vec2::new(impulses[3], impulses[4]));
    b.apply_impulse_angular(impulses[5]);
}
