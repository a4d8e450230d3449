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

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tiercache_common::{
    code::{Key, Value},
    error::{Error, ErrorKind},
    strict_assert,
};

use crate::{
    error::{Full, NotFound},
    eviction::{fifo::Fifo, lru::Lru, Eviction},
    metrics::Metrics,
    storage::{MapStorage, Storage},
};

/// Eviction algorithm of a cache built from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionConfig {
    /// Evict the least recently used key.
    #[default]
    Lru,
    /// Evict the earliest inserted key.
    Fifo,
}

/// [`Cache`] with [`MapStorage`] and [`Lru`] eviction.
pub type LruCache<K, V> = Cache<MapStorage<K, V>, Lru<K>>;
/// [`Cache`] with [`MapStorage`] and [`Fifo`] eviction.
pub type FifoCache<K, V> = Cache<MapStorage<K, V>, Fifo<K>>;

struct CacheShard<S, E> {
    storage: S,
    eviction: E,
    metrics: Metrics,
}

impl<S, E> CacheShard<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    fn put(&mut self, key: S::Key, value: S::Value) {
        let exists = self.storage.contains(&key);

        if let Err(Full { key, value, .. }) = self.storage.put(key.clone(), value) {
            self.evict_and_retry(key.clone(), value);
            self.eviction.key_accessed(&key);
            self.metrics.insert += 1;
            return;
        }

        self.eviction.key_accessed(&key);
        if exists {
            self.metrics.replace += 1;
        } else {
            self.metrics.insert += 1;
        }
    }

    /// Evict one entry and write the rejected entry again.
    ///
    /// One eviction frees room for exactly one new key, so the entry is written at most once more.
    fn evict_and_retry(&mut self, key: S::Key, value: S::Value) {
        let Some(victim) = self.eviction.evict_key() else {
            self.fault(Error::nothing_to_evict(self.storage.capacity(), self.storage.len()));
        };

        strict_assert!(self.storage.contains(&victim));
        self.storage.remove(&victim);
        self.metrics.evict += 1;
        tracing::trace!(?victim, incoming = ?key, "[cache]: evict");

        if self.storage.put(key, value).is_err() {
            self.fault(
                Error::new(ErrorKind::Inconsistent, "storage is still full after evicting one entry")
                .with_context("victim", format!("{victim:?}"))
                .with_context("capacity", self.storage.capacity())
                .with_context("len", self.storage.len()),
            );
        }
    }

    fn get(&mut self, key: &S::Key) -> Option<S::Value> {
        match self.storage.get(key) {
            Ok(value) => {
                let value = value.clone();
                self.eviction.key_accessed(key);
                self.metrics.hit += 1;
                Some(value)
            }
            Err(NotFound) => {
                self.metrics.miss += 1;
                None
            }
        }
    }

    /// Storage and eviction policy disagree. Nothing sensible can be done with the cache afterwards.
    fn fault(&self, err: Error) -> ! {
        tracing::error!(%err, "[cache]: inconsistent state");
        panic!("{err}");
    }
}

/// A single-level cache that binds a [`Storage`] to an [`Eviction`] policy.
///
/// All operations run under one lock that owns both the storage and the policy, so the two are always updated
/// together. When the storage is full, eviction and the retried write happen inside the same critical section.
pub struct Cache<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    shard: Mutex<CacheShard<S, E>>,
}

impl<S, E> std::fmt::Debug for Cache<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shard = self.shard.lock();
        f.debug_struct("Cache")
            .field("len", &shard.storage.len())
            .field("capacity", &shard.storage.capacity())
            .field("metrics", &shard.metrics)
            .finish()
    }
}

impl<S, E> Cache<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    /// Create a cache from a storage and an eviction policy.
    ///
    /// # Panic
    ///
    /// Panics if the storage and the policy do not track the same count of keys.
    pub fn new(storage: S, eviction: E) -> Self {
        assert_eq!(
            storage.len(),
            eviction.len(),
            "storage and eviction policy must start with the same keys"
        );
        Self {
            shard: Mutex::new(CacheShard {
                storage,
                eviction,
                metrics: Metrics::default(),
            }),
        }
    }

    /// Insert or overwrite an entry, evicting one entry if the storage is full.
    ///
    /// # Panic
    ///
    /// Panics if the storage is full while the eviction policy has nothing to evict. That means the storage and the
    /// policy have diverged.
    pub fn put(&self, key: S::Key, value: S::Value) {
        self.shard.lock().put(key, value)
    }

    /// Get the value of `key` and mark it accessed. Returns `None` on miss.
    pub fn get(&self, key: &S::Key) -> Option<S::Value> {
        self.shard.lock().get(key)
    }

    /// Returns `true` if `key` is stored. Does not count as an access.
    pub fn contains(&self, key: &S::Key) -> bool {
        self.shard.lock().storage.contains(key)
    }

    /// Count of stored entries.
    pub fn len(&self) -> usize {
        self.shard.lock().storage.len()
    }

    /// Returns `true` if no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Max count of stored entries.
    pub fn capacity(&self) -> usize {
        self.shard.lock().storage.capacity()
    }

    /// Snapshot of the operation counters.
    pub fn metrics(&self) -> Metrics {
        self.shard.lock().metrics
    }
}

impl<K, V> Cache<MapStorage<K, V>, Lru<K>>
where
    K: Key,
    V: Value,
{
    /// Create an LRU cache that holds at most `capacity` entries.
    pub fn lru(capacity: usize) -> Self {
        Self::new(MapStorage::new(capacity), Lru::with_capacity(capacity))
    }
}

impl<K, V> Cache<MapStorage<K, V>, Fifo<K>>
where
    K: Key,
    V: Value,
{
    /// Create a FIFO cache that holds at most `capacity` entries.
    pub fn fifo(capacity: usize) -> Self {
        Self::new(MapStorage::new(capacity), Fifo::with_capacity(capacity))
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use itertools::Itertools;

    use super::*;

    fn is_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn test_send_sync_static() {
        is_send_sync_static::<LruCache<u64, String>>();
        is_send_sync_static::<FifoCache<String, Vec<u8>>>();
    }

    #[test_log::test]
    fn test_lru_cache_evicts_least_recently_used() {
        let cache = LruCache::lru(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        // Promotes "a", leaving "b" least recently used.
        assert_eq!(cache.get(&"a"), Some(1));

        cache.put("d", 4);
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"c"), Some(3));
        assert_eq!(cache.get(&"d"), Some(4));
        assert_eq!(cache.len(), 3);

        assert_eq!(
            cache.metrics(),
            Metrics {
                insert: 4,
                replace: 0,
                hit: 4,
                miss: 1,
                evict: 1,
            }
        );
    }

    #[test_log::test]
    fn test_eviction_coherence() {
        let cache = LruCache::lru(2);
        cache.put(1u64, 1u64);
        cache.put(2, 2);
        cache.put(3, 3);

        let shard = cache.shard.lock();
        assert_eq!(shard.storage.get(&1), Err(NotFound));
        assert!(!shard.eviction.contains(&1));
        for key in [2, 3] {
            assert!(shard.storage.contains(&key));
            assert!(shard.eviction.contains(&key));
        }
        assert_eq!(shard.eviction.keys().copied().collect_vec(), vec![2, 3]);
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let cache = LruCache::lru(2);
        cache.put(1u64, "one");
        cache.put(2, "two");
        cache.put(1, "uno");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some("uno"));
        assert_eq!(cache.get(&2), Some("two"));
        assert_eq!(cache.metrics().evict, 0);
        assert_eq!(cache.metrics().replace, 1);
    }

    #[test]
    fn test_overwrite_promotes() {
        let cache = LruCache::lru(2);
        cache.put(1u64, 1u64);
        cache.put(2, 2);
        cache.put(1, 10);
        cache.put(3, 3);

        assert!(!cache.contains(&2));
        assert!(cache.contains(&1));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_fifo_cache_ignores_access_order() {
        let cache = FifoCache::fifo(2);
        cache.put(1u64, 1u64);
        cache.put(2, 2);
        assert_eq!(cache.get(&1), Some(1));
        cache.put(3, 3);

        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_capacity_bound() {
        let cache = LruCache::lru(16);
        for i in 0..1000u64 {
            cache.put(i % 97, i);
            assert!(cache.len() <= cache.capacity());
        }
        assert_eq!(cache.len(), 16);
    }

    /// A policy that never has anything to evict.
    #[derive(Debug, Default)]
    struct Amnesia;

    impl Eviction for Amnesia {
        type Key = u64;

        fn key_accessed(&mut self, _: &u64) {}

        fn evict_key(&mut self) -> Option<u64> {
            None
        }

        fn contains(&self, _: &u64) -> bool {
            false
        }

        fn len(&self) -> usize {
            0
        }
    }

    #[test]
    #[should_panic(expected = "storage is full but eviction policy has nothing to evict")]
    fn test_full_storage_with_empty_policy_is_fatal() {
        let cache = Cache::new(MapStorage::new(1), Amnesia);
        cache.put(1, 1u64);
        cache.put(2, 2);
    }

    #[test]
    fn test_concurrent_put_get() {
        const THREADS: u64 = 8;
        const OPS: u64 = 2000;

        let cache = Arc::new(LruCache::lru(64));
        let handles = (0..THREADS)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..OPS {
                        let key = (t * OPS + i) % 128;
                        cache.put(key, key * 2);
                        if let Some(value) = cache.get(&key) {
                            assert_eq!(value, key * 2);
                        }
                    }
                })
            })
            .collect_vec();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 64);
        let shard = cache.shard.lock();
        assert_eq!(shard.eviction.len(), shard.storage.len());
        for key in shard.eviction.keys() {
            assert!(shard.storage.contains(key));
        }
    }
}
