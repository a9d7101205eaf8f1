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
//! Dense row-major matrix and the Gauss-Seidel solver
//!
//! The constraint solver builds `(J M⁻¹ Jᵀ) λ = -J v - bias` from these
//! types. Dimensions are const generics, so a joint Jacobian is a
//! `MatMN<1, 6>` and a penetration Jacobian a `MatMN<2, 6>`; mismatched
//! products do not compile.

use super::VecN;
use std::ops::{Index, IndexMut, Mul};

/// M×N matrix stored as `M` rows of `N` columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatMN<const M: usize, const N: usize> {
    rows: [VecN<N>; M],
}

impl<const M: usize, const N: usize> MatMN<M, N> {
    /// Create a zero matrix
    pub fn new() -> Self {
        MatMN {
            rows: [VecN::new(); M],
        }
    }

    /// Create a matrix from row arrays
    pub fn from_rows(rows: [[f64; N]; M]) -> Self {
        let mut mat = Self::new();
        for (row, values) in mat.rows.iter_mut().zip(rows) {
            *row = VecN::from_array(values);
        }
        mat
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        M
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        N
    }

    /// Set every entry to zero
    pub fn zero(&mut self) {
        for row in self.rows.iter_mut() {
            row.zero();
        }
    }

    /// Borrow a row
    pub fn row(&self, index: usize) -> &VecN<N> {
        &self.rows[index]
    }

    /// Mutably borrow a row
    pub fn row_mut(&mut self, index: usize) -> &mut VecN<N> {
        &mut self.rows[index]
    }

    /// Return the N×M transpose
    pub fn transpose(&self) -> MatMN<N, M> {
        let mut result = MatMN::<N, M>::new();
        for i in 0..M {
            for j in 0..N {
                result.rows[j][i] = self.rows[i][j];
            }
        }
        result
    }
}

impl<const N: usize> MatMN<N, N> {
    /// Diagonal matrix
    pub fn from_diagonal(diagonal: [f64; N]) -> Self {
        let mut mat = Self::new();
        for (i, value) in diagonal.into_iter().enumerate() {
            mat.rows[i][i] = value;
        }
        mat
    }

    /// Solve `self * x = b` with Gauss-Seidel iteration
    ///
    /// Runs `N` sweeps starting from `x = 0`, updating
    /// `x[i] += (b[i] - row_i·x) / A[i][i]`. The matrix is expected to be
    /// symmetric positive semi-definite, which holds for `J M⁻¹ Jᵀ`. An update
    /// that is not finite (zero diagonal, empty constraint row) is skipped
    /// instead of poisoning the solution.
    pub fn solve_gauss_seidel(&self, b: &VecN<N>) -> VecN<N> {
        let mut x = VecN::<N>::new();

        for _ in 0..N {
            for i in 0..N {
                let row = &self.rows[i];
                let dx = (b[i] - row.dot(&x)) / row[i];
                if dx.is_finite() {
                    x[i] += dx;
                }
            }
        }

        x
    }
}

impl<const M: usize, const N: usize> Default for MatMN<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const M: usize, const N: usize> Index<usize> for MatMN<M, N> {
    type Output = VecN<N>;

    fn index(&self, index: usize) -> &VecN<N> {
        &self.rows[index]
    }
}

impl<const M: usize, const N: usize> IndexMut<usize> for MatMN<M, N> {
    fn index_mut(&mut self, index: usize) -> &mut VecN<N> {
        &mut self.rows[index]
    }
}

impl<const M: usize, const N: usize> Mul<VecN<N>> for MatMN<M, N> {
    type Output = VecN<M>;

    fn mul(self, v: VecN<N>) -> VecN<M> {
        let mut result = VecN::<M>::new();
        for (i, row) in self.rows.iter().enumerate() {
            result[i] = row.dot(&v);
        }
        result
    }
}

impl<const M: usize, const N: usize, const P: usize> Mul<MatMN<N, P>> for MatMN<M, N> {
    type Output = MatMN<M, P>;

    fn mul(self, other: MatMN<N, P>) -> MatMN<M, P> {
        let columns = other.transpose();
        let mut result = MatMN::<M, P>::new();
        for i in 0..M {
            for j in 0..P {
                result.rows[i][j] = self.rows[i].dot(&columns.rows[j]);
            }
        }
        result
    }
}
