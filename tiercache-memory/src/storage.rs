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
use tiercache_common::code::{Key, Value};

use crate::error::{Full, NotFound};

/// A capacity-bounded key/value table.
///
/// Capacity is only checked when a new key is inserted. Overwriting a key that is already present never fails.
pub trait Storage: Send + Sync + 'static {
    /// Key type.
    type Key: Key;
    /// Value type.
    type Value: Value;

    /// Insert or overwrite an entry.
    ///
    /// Fails with [`Full`] if the key is new and the storage is at capacity. The storage is left unchanged and the
    /// entry is returned inside the error.
    fn put(&mut self, key: Self::Key, value: Self::Value) -> Result<(), Full<Self::Key, Self::Value>>;

    /// Get the value of `key`.
    fn get(&self, key: &Self::Key) -> Result<&Self::Value, NotFound>;

    /// Remove `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &Self::Key);

    /// Returns `true` if `key` is present.
    fn contains(&self, key: &Self::Key) -> bool;

    /// Count of stored entries.
    fn len(&self) -> usize;

    /// Max count of stored entries.
    fn capacity(&self) -> usize;

    /// Returns `true` if no entry is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`Storage`] backed by a hash map.
#[derive(Debug)]
pub struct MapStorage<K, V> {
    map: HashMap<K, V>,
    capacity: usize,
}

impl<K, V> MapStorage<K, V>
where
    K: Key,
    V: Value,
{
    /// Create a storage that holds at most `capacity` entries.
    ///
    /// # Panic
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "storage capacity must be greater than 0");
        Self {
            map: HashMap::with_capacity(capacity),
            capacity,
        }
    }
}

impl<K, V> Storage for MapStorage<K, V>
where
    K: Key,
    V: Value,
{
    type Key = K;
    type Value = V;

    fn put(&mut self, key: K, value: V) -> Result<(), Full<K, V>> {
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            return Ok(());
        }

        if self.map.len() >= self.capacity {
            return Err(Full {
                key,
                value,
                capacity: self.capacity,
            });
        }

        self.map.insert(key, value);
        Ok(())
    }

    fn get(&self, key: &K) -> Result<&V, NotFound> {
        self.map.get(key).ok_or(NotFound)
    }

    fn remove(&mut self, key: &K) {
        self.map.remove(key);
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
