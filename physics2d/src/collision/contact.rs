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
//! Contact records produced by the narrow phase

use crate::math::Vec2;
use crate::storage::BodyHandle;

/// One manifold point between two bodies
///
/// `start` lies on B's boundary (the point of B deepest inside A) and `end`
/// lies on A's boundary, so `end - start` spans the overlap along `normal`.
/// Contacts are rebuilt every tick and never stored across ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// First body
    pub a: BodyHandle,
    /// Second body
    pub b: BodyHandle,
    /// Contact point on B's boundary
    pub start: Vec2,
    /// Contact point on A's boundary
    pub end: Vec2,
    /// Unit normal pointing from A toward B
    pub normal: Vec2,
    /// Penetration depth, non-negative
    pub depth: f64,
}

impl Contact {
    /// The same contact seen from B
    ///
    /// Swaps the bodies and the endpoints and negates the normal.
    pub fn flipped(self) -> Contact {
        Contact {
            a: self.b,
            b: self.a,
            start: self.end,
            end: self.start,
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flipped() {
        let contact = Contact {
            a: BodyHandle::new(0, 0),
            b: BodyHandle::new(1, 0),
            start: Vec2::new(1.0, 0.0),
            end: Vec2::new(2.0, 0.0),
            normal: Vec2::new(1.0, 0.0),
            depth: 1.0,
        };

        let flipped = contact.flipped();
        assert_eq!(flipped.a, contact.b);
        assert_eq!(flipped.start, contact.end);
        assert_eq!(flipped.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(flipped.flipped(), contact);
    }
}
