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
//! Typed handles into world storage
//!
//! Handles are small `Copy` values that stay valid until the object they
//! name is removed. A handle kept after removal never aliases a newer
//! object: the world rejects it as stale.

use super::ArenaIndex;
use std::fmt;

/// Handle to a rigid body owned by a [`World`](crate::world::World)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(ArenaIndex);

impl BodyHandle {
    /// Create a handle from a slot index and generation
    pub fn new(index: u32, generation: u32) -> Self {
        BodyHandle(ArenaIndex::new(index, generation))
    }

    pub(crate) fn from_index(index: ArenaIndex) -> Self {
        BodyHandle(index)
    }

    pub(crate) fn arena_index(self) -> ArenaIndex {
        self.0
    }

    /// Slot index
    pub fn index(&self) -> u32 {
        self.0.index()
    }

    /// Generation number
    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({}, gen: {})", self.index(), self.generation())
    }
}

/// Handle to a persistent constraint owned by a [`World`](crate::world::World)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(ArenaIndex);

impl ConstraintHandle {
    /// Create a handle from a slot index and generation
    pub fn new(index: u32, generation: u32) -> Self {
        ConstraintHandle(ArenaIndex::new(index, generation))
    }

    pub(crate) fn from_index(index: ArenaIndex) -> Self {
        ConstraintHandle(index)
    }

    pub(crate) fn arena_index(self) -> ArenaIndex {
        self.0
    }

    /// Slot index
    pub fn index(&self) -> u32 {
        self.0.index()
    }

    /// Generation number
    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl fmt::Display for ConstraintHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint({}, gen: {})", self.index(), self.generation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_parts() {
        let handle = BodyHandle::new(42, 1);
        assert_eq!(handle.index(), 42);
        assert_eq!(handle.generation(), 1);
        assert_eq!(handle.to_string(), "Body(42, gen: 1)");
    }

    #[test]
    fn test_handle_equality() {
        assert_eq!(BodyHandle::new(1, 0), BodyHandle::new(1, 0));
        assert_ne!(BodyHandle::new(1, 0), BodyHandle::new(1, 1));
        assert_eq!(
            ConstraintHandle::new(3, 2).to_string(),
            "Constraint(3, gen: 2)"
        );
    }
}
