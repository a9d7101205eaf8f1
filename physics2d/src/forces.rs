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
//! Force providers
//!
//! A [`ForceProvider`] computes a force for a body from the current body
//! state. Providers registered on a [`World`](crate::world::World) are
//! evaluated for every body at the start of each tick, after gravity and the
//! constant global forces. All provider forces for a tick are computed
//! before any of them is applied, so evaluation order does not matter.
//!
//! # Example
//!
//! ```
//! use physics2d::prelude::*;
//!
//! let mut world = World::new(WorldConfig::default().with_gravity(0.0));
//! let ball = world.add_body(
//!     RigidBody::new(Shape::circle(5.0), Vec2::ZERO, 1.0).with_velocity(Vec2::new(10.0, 0.0)),
//! );
//! world.add_force_provider(Box::new(DragForce::new(0.01)));
//!
//! world.update(1.0 / 60.0);
//! assert!(world.body(ball).unwrap().velocity().x < 10.0);
//! ```

use crate::math::Vec2;
use crate::storage::{BodyHandle, BodySet};

/// Source of per-body forces
pub trait ForceProvider: Send + Sync {
    /// Compute the force to apply to `handle`
    ///
    /// Returns `None` if this provider does not act on the body.
    fn compute_force(&self, handle: BodyHandle, bodies: &BodySet) -> Option<Vec2>;

    /// Descriptive name for diagnostics
    fn name(&self) -> &str;
}

/// Quadratic drag `-k |v|² v̂` on every body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragForce {
    /// Drag coefficient
    pub k: f64,
}

impl DragForce {
    /// Create a drag force
    pub fn new(k: f64) -> Self {
        DragForce { k }
    }
}

impl ForceProvider for DragForce {
    fn compute_force(&self, handle: BodyHandle, bodies: &BodySet) -> Option<Vec2> {
        let velocity = bodies.get(handle)?.velocity();
        let speed_squared = velocity.magnitude_squared();
        if speed_squared > 0.0 {
            Some(-velocity.normalized() * (self.k * speed_squared))
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        "drag"
    }
}

/// Constant-magnitude friction opposing motion on every body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionForce {
    /// Friction magnitude
    pub k: f64,
}

impl FrictionForce {
    /// Create a friction force
    pub fn new(k: f64) -> Self {
        FrictionForce { k }
    }
}

impl ForceProvider for FrictionForce {
    fn compute_force(&self, handle: BodyHandle, bodies: &BodySet) -> Option<Vec2> {
        let velocity = bodies.get(handle)?.velocity();
        Some(-velocity.unit_vector() * self.k)
    }

    fn name(&self) -> &str {
        "friction"
    }
}

/// Hooke spring between one body and a fixed anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringForce {
    /// Body attached to the spring
    pub body: BodyHandle,
    /// World-space anchor
    pub anchor: Vec2,
    /// Length at which the spring exerts no force
    pub rest_length: f64,
    /// Stiffness
    pub k: f64,
}

impl SpringForce {
    /// Create a spring
    pub fn new(body: BodyHandle, anchor: Vec2, rest_length: f64, k: f64) -> Self {
        SpringForce {
            body,
            anchor,
            rest_length,
            k,
        }
    }
}

impl ForceProvider for SpringForce {
    fn compute_force(&self, handle: BodyHandle, bodies: &BodySet) -> Option<Vec2> {
        if handle != self.body {
            return None;
        }
        let direction = bodies.get(handle)?.position() - self.anchor;
        let displacement = direction.magnitude() - self.rest_length;
        Some(direction.unit_vector() * (-self.k * displacement))
    }

    fn name(&self) -> &str {
        "spring"
    }
}

/// Gravitational attraction between two bodies
///
/// Each body is pulled toward the other with `g m_a m_b / d²`, where the
/// squared distance is clamped to `[MIN_DISTANCE_SQUARED, MAX_DISTANCE_SQUARED]`
/// to keep the force bounded at close range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionForce {
    /// First body
    pub a: BodyHandle,
    /// Second body
    pub b: BodyHandle,
    /// Gravitational constant
    pub g: f64,
}

impl AttractionForce {
    /// Lower clamp on the squared distance
    pub const MIN_DISTANCE_SQUARED: f64 = 5.0;
    /// Upper clamp on the squared distance
    pub const MAX_DISTANCE_SQUARED: f64 = 100.0;

    /// Create an attraction between `a` and `b`
    pub fn new(a: BodyHandle, b: BodyHandle, g: f64) -> Self {
        AttractionForce { a, b, g }
    }
}

impl ForceProvider for AttractionForce {
    fn compute_force(&self, handle: BodyHandle, bodies: &BodySet) -> Option<Vec2> {
        let other = if handle == self.a {
            self.b
        } else if handle == self.b {
            self.a
        } else {
            return None;
        };

        let body = bodies.get(handle)?;
        let other = bodies.get(other)?;

        let direction = other.position() - body.position();
        let distance_squared = direction
            .magnitude_squared()
            .clamp(Self::MIN_DISTANCE_SQUARED, Self::MAX_DISTANCE_SQUARED);
        let magnitude = self.g * body.mass() * other.mass() / distance_squared;

        Some(direction.unit_vector() * magnitude)
    }

    fn name(&self) -> &str {
        "attraction"
    }
}
