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

/// First-in-first-out eviction.
///
/// Keys are evicted in the order they started being tracked. Accessing a tracked key does not reorder it.
#[derive(Debug)]
pub struct Fifo<K>
where
    K: Key,
{
    queue: OrderedIndex<K>,
}

impl<K> Default for Fifo<K>
where
    K: Key,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Fifo<K>
where
    K: Key,
{
    /// Create an empty FIFO policy.
    pub fn new() -> Self {
        Self {
            queue: OrderedIndex::new(),
        }
    }

    /// Create an empty FIFO policy sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: OrderedIndex::with_capacity(capacity),
        }
    }
}

impl<K> Eviction for Fifo<K>
where
    K: Key,
{
    type Key = K;

    fn key_accessed(&mut self, key: &K) {
        self.queue.push_back_if_absent(key);
    }

    fn evict_key(&mut self) -> Option<K> {
        self.queue.pop_front()
    }

    fn contains(&self, key: &K) -> bool {
        self.queue.contains(key)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo() {
        let mut fifo = Fifo::with_capacity(4);
        for i in 0..4u64 {
            fifo.key_accessed(&i);
        }
        // Re-access keeps insertion order.
        fifo.key_accessed(&0);
        fifo.key_accessed(&2);
        assert_eq!(fifo.len(), 4);

        assert_eq!(fifo.evict_key(), Some(0));
        assert_eq!(fifo.evict_key(), Some(1));

        // 0 is tracked again, behind 2 and 3.
        fifo.key_accessed(&0);
        assert_eq!(fifo.evict_key(), Some(2));
        assert_eq!(fifo.evict_key(), Some(3));
        assert_eq!(fifo.evict_key(), Some(0));
        assert_eq!(fifo.evict_key(), None);
    }
}
