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
//! Math primitives
//!
//! - [`Vec2`]: positions, velocities, normals and impulses
//! - [`VecN`] / [`MatMN`]: fixed-size linear algebra for the constraint solver

mod matmn;
mod vec2;
mod vecn;

pub use matmn::MatMN;
pub use vec2::Vec2;
pub use vecn::VecN;

/// Threshold below which a scalar is treated as zero
pub const EPSILON: f64 = 1e-9;
