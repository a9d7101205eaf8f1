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
//! Pin joint between two bodies

use super::{apply_impulses, inverse_mass_matrix, velocities, Constraint};
use crate::body::RigidBody;
use crate::config::SolverConfig;
use crate::math::{MatMN, Vec2, VecN};
use crate::storage::BodyHandle;
use std::any::Any;

/// Keeps one point of A and one point of B together
///
/// The anchor is stored in each body's local frame, so it moves and rotates
/// with the body. The constraint equation is `C = |pB - pA|²`, and its
/// multiplier is cached and re-applied at the start of the next tick.
#[derive(Debug, Clone)]
pub struct JointConstraint {
    a: BodyHandle,
    b: BodyHandle,
    a_point: Vec2,
    b_point: Vec2,
    jacobian: MatMN<1, 6>,
    cached_lambda: VecN<1>,
    bias: f64,
}

impl JointConstraint {
    /// Pin `a` and `b` together at a world-space anchor
    pub fn new(ha: BodyHandle, a: &RigidBody, hb: BodyHandle, b: &RigidBody, anchor: Vec2) -> Self {
        Self::with_local_anchors(ha, a.world_to_local(anchor), hb, b.world_to_local(anchor))
    }

    /// Pin `a_point` (in A's frame) to `b_point` (in B's frame)
    pub fn with_local_anchors(ha: BodyHandle, a_point: Vec2, hb: BodyHandle, b_point: Vec2) -> Self {
        JointConstraint {
            a: ha,
            b: hb,
            a_point,
            b_point,
            jacobian: MatMN::new(),
            cached_lambda: VecN::new(),
            bias: 0.0,
        }
    }

    /// Anchor in A's local frame
    pub fn local_anchor_a(&self) -> Vec2 {
        self.a_point
    }

    /// Anchor in B's local frame
    pub fn local_anchor_b(&self) -> Vec2 {
        self.b_point
    }

    /// Both anchors in world space
    pub fn anchor_world_points(&self, a: &RigidBody, b: &RigidBody) -> (Vec2, Vec2) {
        (a.local_to_world(self.a_point), b.local_to_world(self.b_point))
    }

    /// Accumulated multiplier carried into the next tick
    pub fn cached_lambda(&self) -> f64 {
        self.cached_lambda[0]
    }
}

impl Constraint for JointConstraint {
    fn bodies(&self) -> (BodyHandle, BodyHandle) {
        (self.a, self.b)
    }

    fn pre_solve(&mut self, a: &mut RigidBody, b: &mut RigidBody, dt: f64, config: &SolverConfig) {
        let (pa, pb) = self.anchor_world_points(a, b);
        let ra = pa - a.position();
        let rb = pb - b.position();

        let j1 = (pa - pb) * 2.0;
        let j2 = ra.cross(pa - pb) * 2.0;
        let j3 = (pb - pa) * 2.0;
        let j4 = rb.cross(pb - pa) * 2.0;
        self.jacobian = MatMN::from_rows([[j1.x, j1.y, j2, j3.x, j3.y, j4]]);

        // Warm start with last tick's impulse
        let impulses = self.jacobian.transpose() * self.cached_lambda;
        apply_impulses(a, b, &impulses);

        let c = ((pb - pa).magnitude_squared() - config.joint_slack).max(0.0);
        self.bias = config.joint_beta / dt * c;
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
        self.cached_lambda += lambda;

        let impulses = jt * lambda;
        apply_impulses(a, b, &impulses);
    }

    fn post_solve(&mut self, config: &SolverConfig) {
        let limit = config.joint_lambda_limit;
        self.cached_lambda[0] = self.cached_lambda[0].clamp(-limit, limit);
    }

    fn name(&self) -> &str {
        "joint"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn pair(distance: f64) -> (RigidBody, RigidBody) {
        (
            RigidBody::new(Shape::circle(1.0), Vec2::ZERO, 1.0),
            RigidBody::new(Shape::circle(1.0), Vec2::new(distance, 0.0), 1.0),
        )
    }

    #[test]
    fn test_anchor_from_world_point() {
        let (a, b) = pair(10.0);
        let joint = JointConstraint::new(
            BodyHandle::new(0, 0),
            &a,
            BodyHandle::new(1, 0),
            &b,
            Vec2::new(4.0, 0.0),
        );
        assert_eq!(joint.local_anchor_a(), Vec2::new(4.0, 0.0));
        assert_eq!(joint.local_anchor_b(), Vec2::new(-6.0, 0.0));

        let (pa, pb) = joint.anchor_world_points(&a, &b);
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_solve_pulls_anchors_together() {
        let (mut a, mut b) = pair(5.0);
        let mut joint = JointConstraint::with_local_anchors(
            BodyHandle::new(0, 0),
            Vec2::ZERO,
            BodyHandle::new(1, 0),
            Vec2::ZERO,
        );
        let config = SolverConfig::default();

        joint.pre_solve(&mut a, &mut b, 1.0 / 60.0, &config);
        joint.solve(&mut a, &mut b);

        // Closing velocity along the joint, none across it
        assert!(a.velocity().x > 0.0);
        assert!(b.velocity().x < 0.0);
        assert!((a.velocity().x + b.velocity().x).abs() < 1e-12);
        assert_eq!(a.velocity().y, 0.0);
        assert!(joint.cached_lambda() < 0.0);
    }

    #[test]
    fn test_satisfied_joint_applies_nothing() {
        let (mut a, mut b) = pair(0.0);
        let mut joint = JointConstraint::with_local_anchors(
            BodyHandle::new(0, 0),
            Vec2::ZERO,
            BodyHandle::new(1, 0),
            Vec2::ZERO,
        );
        let config = SolverConfig::default();

        joint.pre_solve(&mut a, &mut b, 1.0 / 60.0, &config);
        for _ in 0..config.iterations {
            joint.solve(&mut a, &mut b);
        }
        joint.post_solve(&config);

        // Zero Jacobian: the solver skips the update instead of producing NaN
        assert_eq!(a.velocity(), Vec2::ZERO);
        assert_eq!(b.velocity(), Vec2::ZERO);
        assert_eq!(joint.cached_lambda(), 0.0);
    }

    #[test]
    fn test_post_solve_clamps_lambda() {
        let mut joint = JointConstraint::with_local_anchors(
            BodyHandle::new(0, 0),
            Vec2::ZERO,
            BodyHandle::new(1, 0),
            Vec2::ZERO,
        );
        joint.cached_lambda[0] = -1e9;
        joint.post_solve(&SolverConfig::default());
        assert_eq!(joint.cached_lambda(), -10_000.0);
    }
}
