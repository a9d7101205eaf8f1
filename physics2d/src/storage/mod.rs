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
//! Object storage
//!
//! Bodies and constraints are kept in generational [`Arena`]s and addressed
//! through [`BodyHandle`] and [`ConstraintHandle`]. [`BodySet`] wraps the
//! body arena so callers only ever see typed handles.

mod arena;
mod body_set;
mod handle;

pub use arena::{Arena, ArenaIndex};
pub use body_set::BodySet;
pub use handle::{BodyHandle, ConstraintHandle};
