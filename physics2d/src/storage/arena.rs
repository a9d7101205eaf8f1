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
//! Generational slot arena
//!
//! Values live in a flat slot vector. Freed slots go on a free list and are
//! reused by later inserts; every removal bumps the slot's generation so an
//! [`ArenaIndex`] issued before the removal no longer resolves.

/// Slot position plus the generation it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaIndex {
    index: u32,
    generation: u32,
}

impl ArenaIndex {
    /// Create an index from raw parts
    pub fn new(index: u32, generation: u32) -> Self {
        ArenaIndex { index, generation }
    }

    /// Slot position
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot arena with generation-checked access
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    /// Create an empty arena
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty arena with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Store a value, reusing a freed slot if one exists
    pub fn insert(&mut self, value: T) -> ArenaIndex {
        self.len += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return ArenaIndex::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        ArenaIndex::new(index, 0)
    }

    /// Remove and return the value at `index`
    ///
    /// Returns `None` if the index is stale or out of range.
    pub fn remove(&mut self, index: ArenaIndex) -> Option<T> {
        let slot = self.slots.get_mut(index.index as usize)?;
        if slot.generation != index.generation {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(index.index);
        self.len -= 1;
        Some(value)
    }

    /// Check whether `index` refers to a live value
    pub fn contains(&self, index: ArenaIndex) -> bool {
        self.get(index).is_some()
    }

    /// Borrow the value at `index`
    pub fn get(&self, index: ArenaIndex) -> Option<&T> {
        self.slots
            .get(index.index as usize)
            .filter(|slot| slot.generation == index.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Mutably borrow the value at `index`
    pub fn get_mut(&mut self, index: ArenaIndex) -> Option<&mut T> {
        self.slots
            .get_mut(index.index as usize)
            .filter(|slot| slot.generation == index.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Mutably borrow two distinct values at once
    ///
    /// Returns `None` if the indices share a slot or either one is stale.
    pub fn get2_mut(&mut self, a: ArenaIndex, b: ArenaIndex) -> Option<(&mut T, &mut T)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }

        let (i, j) = (a.index as usize, b.index as usize);
        let (slot_a, slot_b) = if i < j {
            let (left, right) = self.slots.split_at_mut(j);
            (&mut left[i], &mut right[0])
        } else {
            let (left, right) = self.slots.split_at_mut(i);
            (&mut right[0], &mut left[j])
        };

        match (slot_a.value.as_mut(), slot_b.value.as_mut()) {
            (Some(value_a), Some(value_b)) => Some((value_a, value_b)),
            _ => None,
        }
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no value is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate live values in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ArenaIndex, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|value| (ArenaIndex::new(i as u32, slot.generation), value))
        })
    }

    /// Mutably iterate live values in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ArenaIndex, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|value| (ArenaIndex::new(i as u32, generation), value))
        })
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
    }

    #[test]
    fn test_stale_index_rejected() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        assert_eq!(arena.remove(a), Some(1));
        assert!(arena.is_empty());

        // The slot is reused with a new generation
        let b = arena.insert(2);
        assert_eq!(b.index(), a.index());
        assert_ne!(b.generation(), a.generation());

        assert!(!arena.contains(a));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.get(b), Some(&2));
    }

    #[test]
    fn test_get2_mut() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);

        if let Some((x, y)) = arena.get2_mut(b, a) {
            *x += 10;
            *y += 20;
        }
        assert_eq!(arena.get(a), Some(&21));
        assert_eq!(arena.get(b), Some(&12));

        assert!(arena.get2_mut(a, a).is_none());
        arena.remove(b);
        assert!(arena.get2_mut(a, b).is_none());
    }

    #[test]
    fn test_iteration_order() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        arena.insert('b');
        arena.insert('c');
        arena.remove(a);

        let values: Vec<char> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['b', 'c']);

        for (_, v) in arena.iter_mut() {
            *v = v.to_ascii_uppercase();
        }
        let values: Vec<char> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['B', 'C']);
    }
}
