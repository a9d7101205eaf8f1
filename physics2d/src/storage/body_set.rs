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
//! Body storage addressed by [`BodyHandle`]

use super::{Arena, BodyHandle};
use crate::body::RigidBody;

/// The world's rigid bodies
///
/// Iteration follows slot order, which is stable between ticks, so the
/// all-pairs collision sweep and the solver visit bodies deterministically.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    arena: Arena<RigidBody>,
}

impl BodySet {
    /// Create an empty set
    pub fn new() -> Self {
        BodySet {
            arena: Arena::new(),
        }
    }

    /// Store a body and return its handle
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        BodyHandle::from_index(self.arena.insert(body))
    }

    /// Remove a body
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.arena.remove(handle.arena_index())
    }

    /// Check whether the handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.arena.contains(handle.arena_index())
    }

    /// Borrow a body
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.arena.get(handle.arena_index())
    }

    /// Mutably borrow a body
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.arena.get_mut(handle.arena_index())
    }

    /// Mutably borrow two distinct bodies
    pub fn get2_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        self.arena.get2_mut(a.arena_index(), b.arena_index())
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the set holds no body
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Iterate bodies with their handles
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.arena
            .iter()
            .map(|(index, body)| (BodyHandle::from_index(index), body))
    }

    /// Mutably iterate bodies with their handles
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.arena
            .iter_mut()
            .map(|(index, body)| (BodyHandle::from_index(index), body))
    }

    /// Handles of all bodies in iteration order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::shape::Shape;

    #[test]
    fn test_insert_remove() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(RigidBody::new(Shape::circle(1.0), Vec2::ZERO, 1.0));
        let b = bodies.insert(RigidBody::new(Shape::circle(2.0), Vec2::ZERO, 1.0));
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies.handles(), vec![a, b]);

        assert!(bodies.remove(a).is_some());
        assert!(!bodies.contains(a));
        assert!(bodies.get(a).is_none());
        assert!(bodies.get2_mut(a, b).is_none());
        assert_eq!(bodies.len(), 1);
    }
}
