// Copyright 2025 tiercache Project Authors
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

/// A token that can be used to access the allocated entry in [`Slab`].
///
/// A token is stale once its entry is removed. Accessing a stale token returns `None`, or the value of a newer
/// entry that reused the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(usize);

impl Token {
    /// Index of the slot addressed by the token.
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Vacant(usize),
    Occupied(T),
}

/// A slab arena with stable indices.
///
/// Removed slots are chained into a free list and reused by later inserts, so the arena never grows past the
/// maximum number of live entries it has held.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    len: usize,
    next: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slab<T> {
    /// Create an empty slab.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
            len: 0,
        }
    }

    /// Create an empty slab that can hold `capacity` entries without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next: 0,
            len: 0,
        }
    }

    /// Insert a value and return the token of its slot.
    pub fn insert(&mut self, val: T) -> Token {
        let index = self.next;
        self.len += 1;

        if index == self.entries.len() {
            self.entries.push(Entry::Occupied(val));
            self.next = index + 1;
        } else {
            self.next = match self.entries[index] {
                Entry::Vacant(next) => next,
                Entry::Occupied(_) => unreachable!("free list points at an occupied slot: {index}"),
            };
            self.entries[index] = Entry::Occupied(val);
        }

        Token(index)
    }

    /// Remove the value addressed by `token`, if any.
    pub fn remove(&mut self, token: Token) -> Option<T> {
        let index = token.index();
        let entry = self.entries.get_mut(index)?;

        if matches!(entry, Entry::Vacant(_)) {
            return None;
        }

        match std::mem::replace(entry, Entry::Vacant(self.next)) {
            Entry::Vacant(_) => unreachable!(),
            Entry::Occupied(val) => {
                self.len -= 1;
                self.next = index;
                Some(val)
            }
        }
    }

    /// Get the value addressed by `token`.
    pub fn get(&self, token: Token) -> Option<&T> {
        match self.entries.get(token.index()) {
            Some(Entry::Occupied(val)) => Some(val),
            _ => None,
        }
    }

    /// Get the mutable value addressed by `token`.
    pub fn get_mut(&mut self, token: Token) -> Option<&mut T> {
        match self.entries.get_mut(token.index()) {
            Some(Entry::Occupied(val)) => Some(val),
            _ => None,
        }
    }

    /// Token that the next [`Slab::insert`] will return.
    pub fn vacant_token(&self) -> Token {
        Token(self.next)
    }

    /// Count of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> std::ops::Index<Token> for Slab<T> {
    type Output = T;

    fn index(&self, token: Token) -> &Self::Output {
        match self.get(token) {
            Some(val) => val,
            None => panic!("invalid slab token: {token:?}"),
        }
    }
}

impl<T> std::ops::IndexMut<Token> for Slab<T> {
    fn index_mut(&mut self, token: Token) -> &mut Self::Output {
        match self.get_mut(token) {
            Some(val) => val,
            None => panic!("invalid slab token: {token:?}"),
        }
    }
}
