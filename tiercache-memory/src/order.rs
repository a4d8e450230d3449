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

use hashbrown::HashMap;
use tiercache_common::{
    code::Key,
    slab::{Slab, Token},
    strict_assert, strict_assert_eq,
};

struct Node<K> {
    /// `None` for the head and tail sentinels.
    key: Option<K>,

    prev: Token,
    next: Token,
}

/// An ordered set of keys with O(1) promotion and O(1) removal from the front.
///
/// Keys are kept in a doubly-linked list whose nodes live in a [`Slab`] and link to each other by [`Token`]. The list
/// is delimited by a head and a tail sentinel so linking and unlinking never branch on list ends. A hash map from key
/// to token gives O(1) lookup of a key's node.
///
/// The front of the list (next to the head sentinel) holds the oldest key, the back holds the newest.
pub struct OrderedIndex<K> {
    slab: Slab<Node<K>>,
    tokens: HashMap<K, Token>,

    head: Token,
    tail: Token,
}

impl<K> std::fmt::Debug for OrderedIndex<K>
where
    K: Key,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K> Default for OrderedIndex<K>
where
    K: Key,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderedIndex<K>
where
    K: Key,
{
    /// Create an empty index.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index that holds `capacity` keys without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slab = Slab::with_capacity(capacity + 2);

        let head = slab.vacant_token();
        slab.insert(Node {
            key: None,
            prev: head,
            next: head,
        });
        let tail = slab.vacant_token();
        slab.insert(Node {
            key: None,
            prev: head,
            next: tail,
        });
        slab[head].next = tail;

        Self {
            slab,
            tokens: HashMap::with_capacity(capacity),
            head,
            tail,
        }
    }

    /// Move `key` to the back, inserting it if absent.
    pub fn push_back_or_promote(&mut self, key: &K) {
        match self.tokens.get(key) {
            Some(&token) => {
                self.unlink(token);
                self.link_before_tail(token);
            }
            None => self.push_back(key.clone()),
        }
    }

    /// Insert `key` at the back if it is absent. Returns `false` and leaves the order unchanged otherwise.
    pub fn push_back_if_absent(&mut self, key: &K) -> bool {
        if self.tokens.contains_key(key) {
            return false;
        }
        self.push_back(key.clone());
        true
    }

    /// Remove and return the front key.
    pub fn pop_front(&mut self) -> Option<K> {
        let token = self.slab[self.head].next;
        if token == self.tail {
            return None;
        }
        Some(self.remove_node(token))
    }

    /// The front key.
    pub fn front(&self) -> Option<&K> {
        self.slab[self.slab[self.head].next].key.as_ref()
    }

    /// The back key.
    pub fn back(&self) -> Option<&K> {
        self.slab[self.slab[self.tail].prev].key.as_ref()
    }

    /// Remove `key`. Returns `false` if it was absent.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.tokens.get(key) {
            Some(&token) => {
                self.remove_node(token);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `key` is in the index.
    pub fn contains(&self, key: &K) -> bool {
        self.tokens.contains_key(key)
    }

    /// Count of keys.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the index holds no key.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the keys from front to back.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            index: self,
            cursor: self.slab[self.head].next,
        }
    }

    fn push_back(&mut self, key: K) {
        let token = self.slab.insert(Node {
            key: Some(key.clone()),
            prev: self.head,
            next: self.tail,
        });
        self.tokens.insert(key, token);
        self.link_before_tail(token);

        strict_assert_eq!(self.tokens.len() + 2, self.slab.len());
    }

    fn remove_node(&mut self, token: Token) -> K {
        strict_assert!(token != self.head && token != self.tail);

        self.unlink(token);
        let node = self.slab.remove(token).expect("linked node must be in the slab");
        let key = node.key.expect("only sentinels have no key");
        self.tokens.remove(&key);

        strict_assert_eq!(self.tokens.len() + 2, self.slab.len());

        key
    }

    fn unlink(&mut self, token: Token) {
        let Node { prev, next, .. } = self.slab[token];
        self.slab[prev].next = next;
        self.slab[next].prev = prev;
    }

    fn link_before_tail(&mut self, token: Token) {
        let prev = self.slab[self.tail].prev;

        let node = &mut self.slab[token];
        node.prev = prev;
        node.next = self.tail;

        self.slab[prev].next = token;
        self.slab[self.tail].prev = token;
    }
}

/// Iterator over the keys of an [`OrderedIndex`], from front to back.
pub struct Iter<'a, K> {
    index: &'a OrderedIndex<K>,
    cursor: Token,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.index.tail {
            return None;
        }
        let node = &self.index.slab[self.cursor];
        self.cursor = node.next;
        node.key.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use itertools::Itertools;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    use super::*;

    fn keys(index: &OrderedIndex<u64>) -> Vec<u64> {
        index.iter().copied().collect_vec()
    }

    #[test]
    fn test_ordered_index_basic() {
        let mut index = OrderedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.pop_front(), None);
        assert_eq!(index.front(), None);
        assert_eq!(index.back(), None);

        for i in 0..4 {
            index.push_back_or_promote(&i);
        }
        assert_eq!(keys(&index), vec![0, 1, 2, 3]);

        // Promote from the front, the middle and the back.
        index.push_back_or_promote(&0);
        assert_eq!(keys(&index), vec![1, 2, 3, 0]);
        index.push_back_or_promote(&2);
        assert_eq!(keys(&index), vec![1, 3, 0, 2]);
        index.push_back_or_promote(&2);
        assert_eq!(keys(&index), vec![1, 3, 0, 2]);
        assert_eq!(index.len(), 4);

        assert_eq!(index.front(), Some(&1));
        assert_eq!(index.back(), Some(&2));

        assert!(index.remove(&3));
        assert!(!index.remove(&3));
        assert_eq!(keys(&index), vec![1, 0, 2]);

        assert_eq!(index.pop_front(), Some(1));
        assert_eq!(index.pop_front(), Some(0));
        assert_eq!(index.pop_front(), Some(2));
        assert_eq!(index.pop_front(), None);
        assert!(index.is_empty());
    }

    #[test]
    fn test_push_back_if_absent() {
        let mut index = OrderedIndex::with_capacity(4);
        assert!(index.push_back_if_absent(&1));
        assert!(index.push_back_if_absent(&2));
        assert!(!index.push_back_if_absent(&1));
        assert_eq!(keys(&index), vec![1, 2]);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut index = OrderedIndex::new();
        for round in 0..100 {
            index.push_back_or_promote(&round);
            index.push_back_or_promote(&(round + 1000));
            index.pop_front();
            index.pop_front();
        }
        assert!(index.is_empty());
        assert_eq!(index.slab.len(), 2);
    }

    /// Compare against a `VecDeque` model with random operations.
    #[test]
    fn test_ordered_index_fuzzy() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut index = OrderedIndex::new();
        let mut model: VecDeque<u64> = VecDeque::new();

        for _ in 0..20_000 {
            match rng.random_range(0..10) {
                0..=5 => {
                    let key = rng.random_range(0..64);
                    index.push_back_or_promote(&key);
                    if let Some(pos) = model.iter().position(|k| *k == key) {
                        model.remove(pos);
                    }
                    model.push_back(key);
                }
                6..=8 => assert_eq!(index.pop_front(), model.pop_front()),
                _ => {
                    let key = rng.random_range(0..64);
                    let pos = model.iter().position(|k| *k == key);
                    if let Some(pos) = pos {
                        model.remove(pos);
                    }
                    assert_eq!(index.remove(&key), pos.is_some());
                }
            }

            assert_eq!(index.len(), model.len());
        }

        assert_eq!(keys(&index), model.into_iter().collect_vec());
    }
}
