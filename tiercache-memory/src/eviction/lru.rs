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

use tiercache_common::code::Key;

use super::Eviction;
use crate::order::OrderedIndex;

/// Least-recently-used eviction.
///
/// Every access moves the key behind all other tracked keys. The key evicted is the one accessed least recently.
#[derive(Debug)]
pub struct Lru<K>
where
    K: Key,
{
    index: OrderedIndex<K>,
}

impl<K> Default for Lru<K>
where
    K: Key,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Lru<K>
where
    K: Key,
{
    /// Create an empty LRU policy.
    pub fn new() -> Self {
        Self {
            index: OrderedIndex::new(),
        }
    }

    /// Create an empty LRU policy sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: OrderedIndex::with_capacity(capacity),
        }
    }

    /// Tracked keys, from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.iter()
    }
}

impl<K> Eviction for Lru<K>
where
    K: Key,
{
    type Key = K;

    fn key_accessed(&mut self, key: &K) {
        self.index.push_back_or_promote(key);
    }

    fn evict_key(&mut self) -> Option<K> {
        self.index.pop_front()
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}
