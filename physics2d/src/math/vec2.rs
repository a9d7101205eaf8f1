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
//! Two-dimensional vector type
//!
//! `Vec2` is used for positions, velocities, forces, impulses and normals.
//! Screen-space convention applies throughout the engine: +X points right
//! and +Y points down.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use physics2d::math::Vec2;
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
/// assert_eq!(v.dot(Vec2::new(1.0, 0.0)), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// The zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Create the zero vector
    pub fn zero() -> Self {
        Vec2::ZERO
    }

    /// Rotate the vector counter-clockwise by `angle` radians
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Euclidean length
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared Euclidean length
    pub fn magnitude_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Normalize in place
    ///
    /// A zero-length vector is left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.magnitude();
        if length != 0.0 {
            self.x /= length;
            self.y /= length;
        }
        self
    }

    /// Return a unit-length copy, or the zero vector for zero-length input
    pub fn normalized(self) -> Self {
        let length = self.magnitude();
        if length != 0.0 {
            Vec2::new(self.x / length, self.y / length)
        } else {
            Vec2::ZERO
        }
    }

    /// Alias of [`Vec2::normalized`]
    pub fn unit_vector(self) -> Self {
        self.normalized()
    }

    /// Unit vector rotated -90 degrees from this one
    ///
    /// For the counter-clockwise vertex order used by polygons this is the
    /// outward normal of an edge. Returns the zero vector for zero input.
    pub fn perpendicular(self) -> Self {
        Vec2::new(self.y, -self.x).normalized()
    }

    /// Dot product
    pub fn dot(self, v: Vec2) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Scalar 2D cross product (z component of the 3D cross product)
    pub fn cross(self, v: Vec2) -> f64 {
        self.x * v.y - self.y * v.x
    }

    /// Check that both components are finite
    pub fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise comparison within `epsilon`
    pub fn approx_eq(self, other: Vec2, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, v: Vec2) -> Vec2 {
        Vec2::new(self.x + v.x, self.y + v.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, v: Vec2) -> Vec2 {
        Vec2::new(self.x - v.x, self.y - v.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, n: f64) -> Vec2 {
        Vec2::new(self.x * n, self.y * n)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, n: f64) -> Vec2 {
        Vec2::new(self.x / n, self.y / n)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, v: Vec2) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, v: Vec2) {
        self.x -= v.x;
        self.y -= v.y;
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, n: f64) {
        self.x *= n;
        self.y *= n;
    }
}

impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, n: f64) {
        self.x /= n;
        self.y /= n;
    }
}
