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
//! # physics2d
//!
//! A 2D rigid-body physics engine with circle, polygon and box shapes,
//! Separating Axis Theorem collision detection with two-point manifolds, and
//! a sequential-impulse solver for contacts and pin joints.
//!
//! ## Features
//!
//! - **Shapes**: circles, convex polygons and boxes with vertex-based inertia
//! - **Narrow Phase**: circle/circle, polygon/polygon and polygon/circle tests
//! - **Constraint Solver**: Gauss-Seidel sequential impulses with Baumgarte
//!   stabilization, friction and warm-started joints
//! - **Stable Handles**: bodies and joints live in generational arenas
//! - **Parallelization**: optional Rayon narrow phase (`parallel` feature)
//!
//! Screen-space coordinates are used throughout: +Y points down, so a
//! positive gravity makes bodies fall toward larger Y.
//!
//! ## Example
//!
//! ```rust
//! use physics2d::prelude::*;
//!
//! let mut world = World::new(WorldConfig::default());
//!
//! let floor = world.add_body(RigidBody::new(Shape::boxed(600.0, 40.0), Vec2::new(300.0, 400.0), 0.0));
//! let crate_box = world.add_body(RigidBody::new(Shape::boxed(40.0, 40.0), Vec2::new(300.0, 300.0), 1.0));
//! let pivot = world.add_body(RigidBody::new(Shape::circle(5.0), Vec2::new(100.0, 100.0), 0.0));
//! let bob = world.add_body(RigidBody::new(Shape::circle(10.0), Vec2::new(160.0, 100.0), 1.0));
//! world.add_joint(pivot, bob, Vec2::new(100.0, 100.0)).unwrap();
//!
//! for _ in 0..60 {
//!     world.update(1.0 / 60.0);
//! }
//!
//! assert!(world.body(crate_box).unwrap().position().y > 300.0);
//! assert!(world.body(floor).unwrap().is_static());
//! ```

#![warn(missing_docs)]

/// Error type for world construction and editing
pub mod error;

/// Vector and matrix primitives
pub mod math;

/// Collision shapes
pub mod shape;

/// Rigid bodies
pub mod body;

/// Generational storage and handles
pub mod storage;

/// Narrow-phase collision detection
pub mod collision;

/// World and solver configuration
pub mod config;

/// Joint and contact constraints
pub mod constraint;

/// Force providers
pub mod forces;

/// Simulation world and tick pipeline
pub mod world;

pub use error::PhysicsError;
pub use world::World;

/// Common imports
pub mod prelude {
    pub use crate::body::RigidBody;
    pub use crate::collision::Contact;
    pub use crate::config::{SolverConfig, WorldConfig};
    pub use crate::constraint::{Constraint, JointConstraint, PenetrationConstraint};
    pub use crate::error::PhysicsError;
    pub use crate::forces::{AttractionForce, DragForce, ForceProvider, FrictionForce, SpringForce};
    pub use crate::math::Vec2;
    pub use crate::shape::{Shape, ShapeType};
    pub use crate::storage::{BodyHandle, ConstraintHandle};
    pub use crate::world::World;
}
