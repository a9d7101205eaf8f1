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
//! The simulation world
//!
//! [`World`] owns every body, the persistent constraints and the global
//! forces, and advances them with [`World::update`]. Each tick runs the same
//! pipeline:
//!
//! 1. Accumulate gravity, global forces and torques, and provider forces
//! 2. Integrate forces into velocities
//! 3. All-pairs narrow phase; one penetration constraint per contact point
//! 4. Pre-solve joints, then contacts
//! 5. Solve joints, then contacts, for the configured number of iterations
//! 6. Post-solve every constraint
//! 7. Integrate velocities into positions and refresh vertex caches
//!
//! Bodies and constraints may only be added or removed between ticks.
//!
//! # Example
//!
//! ```
//! use physics2d::prelude::*;
//!
//! let mut world = World::default();
//! let floor = world.add_body(RigidBody::new(Shape::boxed(400.0, 20.0), Vec2::new(0.0, 100.0), 0.0));
//! let ball = world.add_body(RigidBody::new(Shape::circle(10.0), Vec2::ZERO, 1.0));
//!
//! for _ in 0..120 {
//!     world.update(1.0 / 60.0);
//! }
//!
//! // The ball fell onto the floor and the floor did not move
//! assert!(world.body(ball).unwrap().position().y > 50.0);
//! assert_eq!(world.body(floor).unwrap().position(), Vec2::new(0.0, 100.0));
//! ```

use crate::body::RigidBody;
use crate::collision::{is_colliding, Contact};
use crate::config::WorldConfig;
use crate::constraint::{Constraint, JointConstraint, PenetrationConstraint};
use crate::error::PhysicsError;
use crate::forces::ForceProvider;
use crate::math::Vec2;
use crate::storage::{Arena, BodyHandle, BodySet, ConstraintHandle};
use log::{debug, trace, warn};
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Key of a contact point across ticks: body pair and manifold index
type ContactKey = (BodyHandle, BodyHandle, usize);

/// Container and driver for a 2D rigid-body simulation
pub struct World {
    config: WorldConfig,
    bodies: BodySet,
    constraints: Arena<Box<dyn Constraint>>,
    forces: Vec<Vec2>,
    torques: Vec<f64>,
    force_providers: Vec<Box<dyn ForceProvider>>,
    contacts: Vec<Contact>,
    penetrations: Vec<PenetrationConstraint>,
    contact_cache: HashMap<ContactKey, [f64; 2]>,
}

impl World {
    /// Create an empty world
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. Use [`World::try_new`] for
    /// fallible construction.
    pub fn new(config: WorldConfig) -> Self {
        match Self::try_new(config) {
            Ok(world) => world,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create an empty world, rejecting an invalid configuration
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConfig`] if [`WorldConfig::validate`]
    /// fails.
    pub fn try_new(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(World {
            config,
            bodies: BodySet::new(),
            constraints: Arena::new(),
            forces: Vec::new(),
            torques: Vec::new(),
            force_providers: Vec::new(),
            contacts: Vec::new(),
            penetrations: Vec::new(),
            contact_cache: HashMap::new(),
        })
    }

    /// Current configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Change the gravity scalar (m/s², along +Y)
    pub fn set_gravity(&mut self, gravity: f64) {
        self.config.gravity = gravity;
    }

    /// Add a body and return its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        debug!("Added {} ({} bodies)", handle, self.bodies.len());
        handle
    }

    /// Remove a body together with every constraint attached to it
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidBody`] if the handle is stale.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        if !self.bodies.contains(handle) {
            return Err(PhysicsError::InvalidBody(handle.to_string()));
        }

        let attached: Vec<_> = self
            .constraints
            .iter()
            .filter(|(_, constraint)| {
                let (a, b) = constraint.bodies();
                a == handle || b == handle
            })
            .map(|(index, _)| index)
            .collect();
        for index in attached {
            if let Some(constraint) = self.constraints.remove(index) {
                debug!(
                    "Removed {} constraint {} attached to {}",
                    constraint.name(),
                    ConstraintHandle::from_index(index),
                    handle
                );
            }
        }

        self.contact_cache
            .retain(|&(a, b, _), _| a != handle && b != handle);
        self.contacts.retain(|c| c.a != handle && c.b != handle);

        let body = self
            .bodies
            .remove(handle)
            .ok_or_else(|| PhysicsError::InvalidBody(handle.to_string()))?;
        debug!("Removed {} ({} bodies)", handle, self.bodies.len());
        Ok(body)
    }

    /// Borrow a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Mutably borrow a body between ticks
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Iterate bodies with their handles
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// The body storage, as seen by force providers
    pub fn body_set(&self) -> &BodySet {
        &self.bodies
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Register a persistent constraint
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidBody`] if either body is missing and
    /// [`PhysicsError::SameBody`] if both handles name the same body.
    pub fn add_constraint(
        &mut self,
        constraint: Box<dyn Constraint>,
    ) -> Result<ConstraintHandle, PhysicsError> {
        let (a, b) = constraint.bodies();
        self.check_pair(a, b)?;

        let name = constraint.name().to_string();
        let handle = ConstraintHandle::from_index(self.constraints.insert(constraint));
        debug!("Added {} constraint {} between {} and {}", name, handle, a, b);
        Ok(handle)
    }

    /// Pin two bodies together at a world-space anchor
    ///
    /// # Errors
    ///
    /// Same as [`World::add_constraint`].
    pub fn add_joint(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        anchor: Vec2,
    ) -> Result<ConstraintHandle, PhysicsError> {
        self.check_pair(a, b)?;
        let joint = match (self.bodies.get(a), self.bodies.get(b)) {
            (Some(body_a), Some(body_b)) => JointConstraint::new(a, body_a, b, body_b, anchor),
            _ => return Err(PhysicsError::InvalidBody(format!("{a} or {b}"))),
        };
        self.add_constraint(Box::new(joint))
    }

    fn check_pair(&self, a: BodyHandle, b: BodyHandle) -> Result<(), PhysicsError> {
        for handle in [a, b] {
            if !self.bodies.contains(handle) {
                return Err(PhysicsError::InvalidBody(handle.to_string()));
            }
        }
        if a == b {
            return Err(PhysicsError::SameBody(a.to_string()));
        }
        Ok(())
    }

    /// Remove a persistent constraint
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConstraint`] if the handle is stale.
    pub fn remove_constraint(
        &mut self,
        handle: ConstraintHandle,
    ) -> Result<Box<dyn Constraint>, PhysicsError> {
        let constraint = self
            .constraints
            .remove(handle.arena_index())
            .ok_or_else(|| PhysicsError::InvalidConstraint(handle.to_string()))?;
        debug!("Removed {} constraint {}", constraint.name(), handle);
        Ok(constraint)
    }

    /// Borrow a persistent constraint
    pub fn constraint(&self, handle: ConstraintHandle) -> Option<&dyn Constraint> {
        self.constraints
            .get(handle.arena_index())
            .map(|constraint| constraint.as_ref())
    }

    /// Iterate persistent constraints with their handles
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintHandle, &dyn Constraint)> {
        self.constraints
            .iter()
            .map(|(index, constraint)| (ConstraintHandle::from_index(index), constraint.as_ref()))
    }

    /// Number of persistent constraints
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Add a force applied to every body on every tick
    pub fn add_force(&mut self, force: Vec2) {
        self.forces.push(force);
    }

    /// Add a torque applied to every body on every tick
    pub fn add_torque(&mut self, torque: f64) {
        self.torques.push(torque);
    }

    /// Register a force provider evaluated for every body on every tick
    pub fn add_force_provider(&mut self, provider: Box<dyn ForceProvider>) {
        debug!("Registered force provider '{}'", provider.name());
        self.force_providers.push(provider);
    }

    /// Contact points found on the last tick
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Sum of kinetic energy over all bodies
    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|(_, body)| body.kinetic_energy()).sum()
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// The caller is expected to clamp `dt`. A non-positive or non-finite
    /// timestep is logged and ignored.
    pub fn update(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            warn!("Ignoring update with invalid timestep {}", dt);
            return;
        }

        self.apply_forces();

        for (_, body) in self.bodies.iter_mut() {
            body.integrate_forces(dt);
        }

        self.detect_collisions();
        self.build_penetrations();
        self.solve_constraints(dt);

        for (_, body) in self.bodies.iter_mut() {
            body.integrate_velocities(dt);
        }

        trace!(
            "Tick dt={} bodies={} joints={} contacts={}",
            dt,
            self.bodies.len(),
            self.constraints.len(),
            self.contacts.len()
        );
    }

    fn apply_forces(&mut self) {
        // Providers see the pre-tick state of every body
        let mut provided = Vec::new();
        for (handle, _) in self.bodies.iter() {
            for provider in &self.force_providers {
                match provider.compute_force(handle, &self.bodies) {
                    Some(force) if force.is_valid() => provided.push((handle, force)),
                    Some(force) => warn!(
                        "Force provider '{}' produced invalid force {} for {}",
                        provider.name(),
                        force,
                        handle
                    ),
                    None => {}
                }
            }
        }

        let weight_per_mass = self.config.gravity * self.config.pixels_per_meter;
        for (_, body) in self.bodies.iter_mut() {
            body.add_force(Vec2::new(0.0, weight_per_mass * body.mass()));

            for &force in &self.forces {
                body.add_force(force);
            }
            for &torque in &self.torques {
                body.add_torque(torque);
            }
        }

        for (handle, force) in provided {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.add_force(force);
            }
        }
    }

    fn detect_collisions(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.set_colliding(false);
        }

        self.contacts = find_contacts(&self.bodies);

        for contact in &self.contacts {
            for handle in [contact.a, contact.b] {
                if let Some(body) = self.bodies.get_mut(handle) {
                    body.set_colliding(true);
                }
            }
        }
    }

    fn build_penetrations(&mut self) {
        self.penetrations.clear();
        let warm_start = self.config.solver.warm_start_contacts;

        let mut manifold_index = 0;
        let mut previous_pair = None;
        for contact in &self.contacts {
            let pair = (contact.a, contact.b);
            manifold_index = if previous_pair == Some(pair) {
                manifold_index + 1
            } else {
                0
            };
            previous_pair = Some(pair);

            let (Some(a), Some(b)) = (self.bodies.get(contact.a), self.bodies.get(contact.b)) else {
                continue;
            };

            let mut penetration = PenetrationConstraint::new(contact, a, b);
            if warm_start {
                if let Some(&lambda) = self.contact_cache.get(&(pair.0, pair.1, manifold_index)) {
                    penetration = penetration.with_cached_lambda(lambda);
                }
            }
            self.penetrations.push(penetration);
        }
    }

    fn solve_constraints(&mut self, dt: f64) {
        let solver = &self.config.solver;

        for (_, joint) in self.constraints.iter_mut() {
            let (ha, hb) = joint.bodies();
            if let Some((a, b)) = self.bodies.get2_mut(ha, hb) {
                joint.pre_solve(a, b, dt, solver);
            }
        }
        for penetration in &mut self.penetrations {
            let (ha, hb) = penetration.bodies();
            if let Some((a, b)) = self.bodies.get2_mut(ha, hb) {
                penetration.pre_solve(a, b, dt, solver);
            }
        }

        for _ in 0..solver.iterations {
            for (_, joint) in self.constraints.iter_mut() {
                let (ha, hb) = joint.bodies();
                if let Some((a, b)) = self.bodies.get2_mut(ha, hb) {
                    joint.solve(a, b);
                }
            }
            for penetration in &mut self.penetrations {
                let (ha, hb) = penetration.bodies();
                if let Some((a, b)) = self.bodies.get2_mut(ha, hb) {
                    penetration.solve(a, b);
                }
            }
        }

        for (_, joint) in self.constraints.iter_mut() {
            joint.post_solve(solver);
        }
        for penetration in &mut self.penetrations {
            penetration.post_solve(solver);
        }

        self.contact_cache.clear();
        if solver.warm_start_contacts {
            let mut manifold_index = 0;
            let mut previous_pair = None;
            for penetration in &self.penetrations {
                let pair = penetration.bodies();
                manifold_index = if previous_pair == Some(pair) {
                    manifold_index + 1
                } else {
                    0
                };
                previous_pair = Some(pair);
                self.contact_cache
                    .insert((pair.0, pair.1, manifold_index), penetration.cached_lambda());
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Test every unordered pair of bodies once, in slot order
#[cfg(not(feature = "parallel"))]
fn find_contacts(bodies: &BodySet) -> Vec<Contact> {
    let bodies: Vec<_> = bodies.iter().collect();
    let mut contacts = Vec::new();

    for (i, &(ha, a)) in bodies.iter().enumerate() {
        for &(hb, b) in &bodies[i + 1..] {
            is_colliding(ha, a, hb, b, &mut contacts);
        }
    }

    contacts
}

/// Test every unordered pair of bodies once, in slot order
///
/// Rows of the pair matrix run on the rayon pool; collecting preserves row
/// order, so the result matches the sequential sweep.
#[cfg(feature = "parallel")]
fn find_contacts(bodies: &BodySet) -> Vec<Contact> {
    let bodies: Vec<_> = bodies.iter().collect();

    bodies
        .par_iter()
        .enumerate()
        .map(|(i, &(ha, a))| {
            let mut contacts = Vec::new();
            for &(hb, b) in &bodies[i + 1..] {
                is_colliding(ha, a, hb, b, &mut contacts);
            }
            contacts
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}
