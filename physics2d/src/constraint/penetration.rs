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
//! Contact constraint with Coulomb friction

use super::{apply_impulses, inverse_mass_matrix, velocities, Constraint};
use crate::body::RigidBody;
use crate::collision::Contact;
use crate::config::SolverConfig;
use crate::math::{MatMN, Vec2, VecN};
use crate::storage::BodyHandle;
use std::any::Any;

/// Non-penetration constraint for one manifold point
///
/// Row 0 of the Jacobian acts along the contact normal and row 1 along the
/// tangent. The normal multiplier is kept non-negative so bodies are only
/// pushed apart, and the friction multiplier is bounded by
/// `normal multiplier * friction`. Contacts are rebuilt from the narrow
/// phase every tick.
#[derive(Debug, Clone)]
pub struct PenetrationConstraint {
    a: BodyHandle,
    b: BodyHandle,
    a_point: Vec2,
    b_point: Vec2,
    normal: Vec2,
    friction: f64,
    jacobian: MatMN<2, 6>,
    cached_lambda: VecN<2>,
    bias: f64,
}

impl PenetrationConstraint {
    /// Build a constraint from a contact between `a` and `b`
    pub fn new(contact: &Contact, a: &RigidBody, b: &RigidBody) -> Self {
        PenetrationConstraint {
            a: contact.a,
            b: contact.b,
            a_point: a.world_to_local(contact.start),
            b_point: b.world_to_local(contact.end),
            // Direction only: rotate into A's frame without translating
            normal: contact.normal.rotate(-a.rotation()),
            friction: 0.0,
            jacobian: MatMN::new(),
            cached_lambda: VecN::new(),
            bias: 0.0,
        }
    }

    /// Seed the multipliers, e.g. from the previous tick
    pub fn with_cached_lambda(mut self, lambda: [f64; 2]) -> Self {
        self.cached_lambda = VecN::from_array(lambda);
        self
    }

    /// Accumulated normal and friction multipliers
    pub fn cached_lambda(&self) -> [f64; 2] {
        *self.cached_lambda.as_array()
    }

    /// Contact normal in world space for the given A
    pub fn world_normal(&self, a: &RigidBody) -> Vec2 {
        self.normal.rotate(a.rotation())
    }

    /// Effective friction coefficient from the last pre-solve
    pub fn friction(&self) -> f64 {
        self.friction
    }
}

impl Constraint for PenetrationConstraint {
    fn bodies(&self) -> (BodyHandle, BodyHandle) {
        (self.a, self.b)
    }

    fn pre_solve(&mut self, a: &mut RigidBody, b: &mut RigidBody, dt: f64, config: &SolverConfig) {
        let pa = a.local_to_world(self.a_point);
        let pb = b.local_to_world(self.b_point);
        let n = self.world_normal(a);

        let ra = pa - a.position();
        let rb = pb - b.position();

        self.jacobian.zero();
        self.jacobian[0] = VecN::from_array([-n.x, -n.y, -ra.cross(n), n.x, n.y, rb.cross(n)]);

        self.friction = a.friction().max(b.friction());
        if self.friction > 0.0 {
            let t = n.perpendicular();
            self.jacobian[1] =
                VecN::from_array([-t.x, -t.y, -ra.cross(t), t.x, t.y, rb.cross(t)]);
        }

        // Approach speed before any impulse of this tick
        let approach_speed = (a.velocity_at(ra) - b.velocity_at(rb)).dot(n);

        let impulses = self.jacobian.transpose() * self.cached_lambda;
        apply_impulses(a, b, &impulses);

        let c = ((pb - pa).dot(-n) + config.penetration_slack).min(0.0);
        self.bias = config.penetration_beta / dt * c;

        if config.restitution_bias {
            let e = a.restitution().min(b.restitution());
            self.bias -= e * approach_speed.max(0.0);
        }
    }

    fn solve(&mut self, a: &mut RigidBody, b: &mut RigidBody) {
        let v = velocities(a, b);
        let inv_m = inverse_mass_matrix(a, b);

        let j = self.jacobian;
        let jt = j.transpose();

        let lhs = j * inv_m * jt;
        let mut rhs = -(j * v);
        rhs[0] -= self.bias;

        let lambda = lhs.solve_gauss_seidel(&rhs);

        let old_lambda = self.cached_lambda;
        self.cached_lambda += lambda;
        self.cached_lambda[0] = self.cached_lambda[0].max(0.0);

        if self.friction > 0.0 {
            let max_friction = self.cached_lambda[0] * self.friction;
            self.cached_lambda[1] = self.cached_lambda[1].clamp(-max_friction, max_friction);
        }

        let impulses = jt * (self.cached_lambda - old_lambda);
        apply_impulses(a, b, &impulses);
    }

    fn name(&self) -> &str {
        "penetration"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
