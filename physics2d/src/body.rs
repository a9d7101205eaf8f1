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
//! Rigid bodies
//!
//! A [`RigidBody`] owns one [`Shape`] and the full kinematic and dynamic
//! state of an object. Motion is integrated with semi-implicit Euler in two
//! halves so the constraint solver can correct velocities in between:
//!
//! 1. [`RigidBody::integrate_forces`]: forces to velocity
//! 2. constraint solving
//! 3. [`RigidBody::integrate_velocities`]: velocity to position
//!
//! A body built with mass 0 is static. Its inverse mass and inverse inertia
//! are exactly 0 and every impulse or integration call leaves it untouched.

use crate::error::PhysicsError;
use crate::math::Vec2;
use crate::shape::Shape;
use log::warn;

/// Rigid body with a shape, transform, velocities and mass properties
#[derive(Debug, Clone)]
pub struct RigidBody {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,

    rotation: f64,
    angular_velocity: f64,
    angular_acceleration: f64,

    sum_forces: Vec2,
    sum_torque: f64,

    mass: f64,
    inv_mass: f64,
    inertia: f64,
    inv_inertia: f64,

    restitution: f64,
    friction: f64,

    shape: Shape,
    is_colliding: bool,
}

impl RigidBody {
    /// Inverse mass below which a body is treated as static
    pub const STATIC_THRESHOLD: f64 = 1e-10;

    /// Default coefficient of restitution
    pub const DEFAULT_RESTITUTION: f64 = 1.0;

    /// Default coefficient of friction
    pub const DEFAULT_FRICTION: f64 = 0.7;

    /// Create a body at `position` with the given mass (0 for static)
    ///
    /// # Panics
    ///
    /// Panics if the mass is negative, NaN or infinite. Use
    /// [`RigidBody::try_new`] for fallible construction.
    pub fn new(shape: Shape, position: Vec2, mass: f64) -> Self {
        assert!(
            mass >= 0.0 && mass.is_finite(),
            "Mass must be non-negative and finite"
        );
        Self::build(shape, position, mass)
    }

    /// Create a body, rejecting invalid mass
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidMass`] if the mass is negative, NaN or
    /// infinite.
    pub fn try_new(shape: Shape, position: Vec2, mass: f64) -> Result<Self, PhysicsError> {
        if mass >= 0.0 && mass.is_finite() {
            Ok(Self::build(shape, position, mass))
        } else {
            Err(PhysicsError::InvalidMass(mass))
        }
    }

    fn build(mut shape: Shape, position: Vec2, mass: f64) -> Self {
        let inv_mass = if mass != 0.0 { 1.0 / mass } else { 0.0 };

        let inertia = shape.moment_of_inertia() * mass;
        let inv_inertia = if inertia != 0.0 { 1.0 / inertia } else { 0.0 };

        shape.update_vertices(position, 0.0);

        RigidBody {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            sum_forces: Vec2::ZERO,
            sum_torque: 0.0,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            restitution: Self::DEFAULT_RESTITUTION,
            friction: Self::DEFAULT_FRICTION,
            shape,
            is_colliding: false,
        }
    }

    /// Set the initial rotation in radians
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Set the initial linear velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initial angular velocity
    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Set the coefficient of restitution
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the coefficient of friction
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Check if the body is immovable
    pub fn is_static(&self) -> bool {
        self.inv_mass < Self::STATIC_THRESHOLD
    }

    /// Center of mass in world space
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the body and refresh its world-space vertices
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.shape.update_vertices(self.position, self.rotation);
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotate the body and refresh its world-space vertices
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.shape.update_vertices(self.position, self.rotation);
    }

    /// Linear velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Set the linear velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Angular velocity in radians per second
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Set the angular velocity
    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    /// Linear acceleration from the last force integration
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Angular acceleration from the last force integration
    pub fn angular_acceleration(&self) -> f64 {
        self.angular_acceleration
    }

    /// Mass (0 for static bodies)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Inverse mass (0 for static bodies)
    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    /// Moment of inertia
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Inverse moment of inertia (0 for static bodies)
    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    /// Coefficient of restitution
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Set the coefficient of restitution
    pub fn set_restitution(&mut self, restitution: f64) {
        self.restitution = restitution;
    }

    /// Coefficient of friction
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Set the coefficient of friction
    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction;
    }

    /// The body's shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Whether the narrow phase found this body in contact on the last tick
    ///
    /// Meant for debug drawing only.
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    pub(crate) fn set_colliding(&mut self, colliding: bool) {
        self.is_colliding = colliding;
    }

    /// Accumulated force since the last integration
    pub fn sum_forces(&self) -> Vec2 {
        self.sum_forces
    }

    /// Accumulated torque since the last integration
    pub fn sum_torque(&self) -> f64 {
        self.sum_torque
    }

    /// Accumulate a force through the center of mass
    pub fn add_force(&mut self, force: Vec2) {
        self.sum_forces += force;
    }

    /// Accumulate a torque
    pub fn add_torque(&mut self, torque: f64) {
        self.sum_torque += torque;
    }

    /// Reset the accumulated force
    pub fn clear_forces(&mut self) {
        self.sum_forces = Vec2::ZERO;
    }

    /// Reset the accumulated torque
    pub fn clear_torque(&mut self) {
        self.sum_torque = 0.0;
    }

    /// Transform a point from the body frame to world space
    pub fn local_to_world(&self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }

    /// Transform a point from world space to the body frame
    pub fn world_to_local(&self, point: Vec2) -> Vec2 {
        (point - self.position).rotate(-self.rotation)
    }

    /// Change linear velocity by `impulse * inv_mass`
    pub fn apply_impulse_linear(&mut self, impulse: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inv_mass;
    }

    /// Change angular velocity by `impulse * inv_inertia`
    pub fn apply_impulse_angular(&mut self, impulse: f64) {
        if self.is_static() {
            return;
        }
        self.angular_velocity += impulse * self.inv_inertia;
    }

    /// Apply an impulse at offset `r` from the center of mass
    pub fn apply_impulse_at_point(&mut self, impulse: Vec2, r: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia;
    }

    /// Velocity of a point at offset `r` from the center of mass
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity + Vec2::new(-self.angular_velocity * r.y, self.angular_velocity * r.x)
    }

    /// Integrate accumulated force and torque into velocities
    ///
    /// Clears both accumulators. Static bodies keep their velocities.
    pub fn integrate_forces(&mut self, dt: f64) {
        if !self.is_static() {
            self.acceleration = self.sum_forces * self.inv_mass;
            self.velocity += self.acceleration * dt;

            self.angular_acceleration = self.sum_torque * self.inv_inertia;
            self.angular_velocity += self.angular_acceleration * dt;
        }

        self.clear_forces();
        self.clear_torque();
    }

    /// Integrate velocities into position and rotation, then refresh the
    /// world-space vertex cache
    pub fn integrate_velocities(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }

        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;

        if !self.position.is_valid() || !self.rotation.is_finite() {
            warn!(
                "Body state became non-finite: position {}, rotation {}",
                self.position, self.rotation
            );
        }

        self.shape.update_vertices(self.position, self.rotation);
    }

    /// Linear plus rotational kinetic energy
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
            + 0.5 * self.inertia * self.angular_velocity * self.angular_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_mass_properties() {
        let body = RigidBody::new(Shape::circle(10.0), Vec2::ZERO, 2.0);
        assert_eq!(body.inv_mass(), 0.5);
        assert_eq!(body.inertia(), 100.0);
        assert_eq!(body.inv_inertia(), 0.01);
        assert!(!body.is_static());
        assert_eq!(body.restitution(), 1.0);
        assert_eq!(body.friction(), 0.7);
    }

    #[test]
    fn test_static_body_ignores_impulses() {
        let mut body = RigidBody::new(Shape::boxed(100.0, 20.0), Vec2::ZERO, 0.0);
        assert!(body.is_static());
        assert_eq!(body.inv_mass(), 0.0);
        assert_eq!(body.inv_inertia(), 0.0);

        body.apply_impulse_linear(Vec2::new(1e12, -1e12));
        body.apply_impulse_angular(1e12);
        body.apply_impulse_at_point(Vec2::new(1e9, 1e9), Vec2::new(5.0, -3.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.angular_velocity(), 0.0);

        body.add_force(Vec2::new(0.0, 1000.0));
        body.integrate_forces(0.1);
        body.integrate_velocities(0.1);
        assert_eq!(body.position(), Vec2::ZERO);
        assert_eq!(body.sum_forces(), Vec2::ZERO);
    }

    #[test]
    fn test_heavy_body_is_not_static() {
        let body = RigidBody::new(Shape::circle(1.0), Vec2::ZERO, 1000.0);
        assert!(!body.is_static());
    }

    #[test]
    #[should_panic(expected = "Mass must be non-negative and finite")]
    fn test_negative_mass_panics() {
        RigidBody::new(Shape::circle(1.0), Vec2::ZERO, -1.0);
    }

    #[test]
    fn test_try_new_rejects_bad_mass() {
        assert_eq!(
            RigidBody::try_new(Shape::circle(1.0), Vec2::ZERO, f64::NAN)
                .err()
                .map(|e| e.to_string().starts_with("invalid mass")),
            Some(true)
        );
        assert!(RigidBody::try_new(Shape::circle(1.0), Vec2::ZERO, f64::INFINITY).is_err());
        assert!(RigidBody::try_new(Shape::circle(1.0), Vec2::ZERO, 0.0).is_ok());
    }

    #[test]
    fn test_impulse_at_point() {
        let mut body = RigidBody::new(Shape::circle(10.0), Vec2::ZERO, 1.0);
        body.apply_impulse_at_point(Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0));
        assert_eq!(body.velocity(), Vec2::new(0.0, 10.0));
        // cross((10, 0), (0, 10)) = 100, inv_inertia = 1 / 50
        assert!((body.angular_velocity() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_conversion() {
        let body = RigidBody::new(Shape::boxed(10.0, 10.0), Vec2::new(5.0, 5.0), 1.0)
            .with_rotation(FRAC_PI_2);

        let world = body.local_to_world(Vec2::new(1.0, 0.0));
        assert!(world.approx_eq(Vec2::new(5.0, 6.0), 1e-12));

        let local = body.world_to_local(world);
        assert!(local.approx_eq(Vec2::new(1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_two_phase_integration() {
        let mut body = RigidBody::new(Shape::boxed(2.0, 2.0), Vec2::ZERO, 2.0);
        body.add_force(Vec2::new(4.0, 0.0));
        body.add_torque(body.inertia());

        body.integrate_forces(0.5);
        assert_eq!(body.acceleration(), Vec2::new(2.0, 0.0));
        assert_eq!(body.velocity(), Vec2::new(1.0, 0.0));
        assert!((body.angular_velocity() - 0.5).abs() < 1e-12);
        assert_eq!(body.sum_forces(), Vec2::ZERO);
        assert_eq!(body.sum_torque(), 0.0);
        // Position is untouched until the velocity phase
        assert_eq!(body.position(), Vec2::ZERO);

        body.integrate_velocities(0.5);
        assert_eq!(body.position(), Vec2::new(0.5, 0.0));
        assert!((body.rotation() - 0.25).abs() < 1e-12);

        // Vertex cache follows the integrated transform
        let expected = Vec2::new(-1.0, -1.0).rotate(0.25) + Vec2::new(0.5, 0.0);
        assert!(body.shape().world_vertices()[0].approx_eq(expected, 1e-12));
    }

    #[test]
    fn test_setters_refresh_vertices() {
        let mut body = RigidBody::new(Shape::boxed(2.0, 2.0), Vec2::ZERO, 1.0);
        body.set_position(Vec2::new(10.0, 0.0));
        assert_eq!(body.shape().world_vertices()[0], Vec2::new(9.0, -1.0));
    }

    #[test]
    fn test_kinetic_energy() {
        let body = RigidBody::new(Shape::circle(2.0), Vec2::ZERO, 2.0)
            .with_velocity(Vec2::new(3.0, 4.0))
            .with_angular_velocity(1.0);
        // 0.5 * 2 * 25 + 0.5 * (0.5 * 4 * 2) * 1
        assert!((body.kinetic_energy() - 27.0).abs() < 1e-12);
    }
}
