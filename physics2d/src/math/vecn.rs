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
//! Dense fixed-length vector used by the constraint solver

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// N-dimensional vector stored inline
///
/// The solver works on the stacked velocity vector
/// `[vAx, vAy, ωA, vBx, vBy, ωB]`, so `N` is 6 for body-space vectors and
/// equals the number of constraint rows for multiplier vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VecN<const N: usize> {
    data: [f64; N],
}

impl<const N: usize> VecN<N> {
    /// Create a zero vector
    pub fn new() -> Self {
        VecN { data: [0.0; N] }
    }

    /// Create a vector from an array
    pub fn from_array(data: [f64; N]) -> Self {
        VecN { data }
    }

    /// Number of components
    pub fn len(&self) -> usize {
        N
    }

    /// True when `N` is zero
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Set every component to zero
    pub fn zero(&mut self) {
        self.data = [0.0; N];
    }

    /// Dot product
    pub fn dot(&self, v: &VecN<N>) -> f64 {
        self.data.iter().zip(v.data.iter()).map(|(a, b)| a * b).sum()
    }

    /// Borrow the components
    pub fn as_array(&self) -> &[f64; N] {
        &self.data
    }
}

impl<const N: usize> Default for VecN<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Index<usize> for VecN<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl<const N: usize> IndexMut<usize> for VecN<N> {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl<const N: usize> Add for VecN<N> {
    type Output = VecN<N>;

    fn add(mut self, v: VecN<N>) -> VecN<N> {
        self += v;
        self
    }
}

impl<const N: usize> Sub for VecN<N> {
    type Output = VecN<N>;

    fn sub(mut self, v: VecN<N>) -> VecN<N> {
        self -= v;
        self
    }
}

impl<const N: usize> Mul<f64> for VecN<N> {
    type Output = VecN<N>;

    fn mul(mut self, n: f64) -> VecN<N> {
        self *= n;
        self
    }
}

impl<const N: usize> Neg for VecN<N> {
    type Output = VecN<N>;

    fn neg(self) -> VecN<N> {
        self * -1.0
    }
}

impl<const N: usize> AddAssign for VecN<N> {
    fn add_assign(&mut self, v: VecN<N>) {
        for (a, b) in self.data.iter_mut().zip(v.data.iter()) {
            *a += b;
        }
    }
}

impl<const N: usize> SubAssign for VecN<N> {
    fn sub_assign(&mut self, v: VecN<N>) {
        for (a, b) in self.data.iter_mut().zip(v.data.iter()) {
            *a -= b;
        }
    }
}

impl<const N: usize> MulAssign<f64> for VecN<N> {
    fn mul_assign(&mut self, n: f64) {
        for a in self.data.iter_mut() {
            *a *= n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_len() {
        let mut v = VecN::from_array([1.0, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        v.zero();
        assert_eq!(v, VecN::<3>::new());
    }

    #[test]
    fn test_dot() {
        let a = VecN::from_array([1.0, 2.0, 3.0]);
        let b = VecN::from_array([4.0, -5.0, 6.0]);
        assert_eq!(a.dot(&b), 12.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = VecN::from_array([1.0, 2.0]);
        let b = VecN::from_array([0.5, 0.5]);
        assert_eq!(a + b, VecN::from_array([1.5, 2.5]));
        assert_eq!(a - b, VecN::from_array([0.5, 1.5]));
        assert_eq!(a * 2.0, VecN::from_array([2.0, 4.0]));
        assert_eq!(-a, VecN::from_array([-1.0, -2.0]));
    }

    #[test]
    fn test_index() {
        let mut v = VecN::<6>::new();
        v[5] = 7.0;
        assert_eq!(v[5], 7.0);
        assert_eq!(v.as_array()[5], 7.0);
    }
}
