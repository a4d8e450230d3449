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

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use parking_lot::Mutex;
use tiercache_common::code::{Key, Value};
use tiercache_memory::{Cache, Eviction, Storage};

use crate::config::LatencyCost;

/// Outcome of [`LevelCache::put`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PutResult {
    /// Simulated latency accumulated by this level and the levels after it.
    pub elapsed: f64,
}

/// Outcome of [`LevelCache::get`].
#[derive(Debug, Clone, PartialEq)]
pub struct GetResult<V> {
    /// Simulated latency accumulated by this level and the levels after it.
    pub elapsed: f64,
    /// The value found, `None` if every level missed.
    pub value: Option<V>,
}

/// One level in a chain of caches.
pub trait LevelCache<K, V>: Send + Sync + 'static
where
    K: Key,
    V: Value,
{
    /// Write `value` to this level and, if it changed, to the levels after it.
    fn put(&self, key: K, value: V) -> PutResult;

    /// Read `key` from this level, falling back to the levels after it on miss.
    fn get(&self, key: &K) -> GetResult<V>;
}

impl<K, V> Debug for dyn LevelCache<K, V>
where
    K: Key,
    V: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LevelCache")
    }
}

/// A level backed by a [`Cache`], forwarding misses and changed writes to the next level.
pub struct DefaultCache<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    cache: Cache<S, E>,
    cost: LatencyCost,
    next: Arc<dyn LevelCache<S::Key, S::Value>>,

    /// Serializes the read-compare-write sequences of this level.
    lock: Mutex<()>,
}

impl<S, E> Debug for DefaultCache<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultCache")
            .field("cache", &self.cache)
            .field("cost", &self.cost)
            .field("next", &self.next)
            .finish()
    }
}

impl<S, E> DefaultCache<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    /// Create a level from its cache, its simulated latency and the level after it.
    ///
    /// Use [`NullCache`] as `next` for the last level.
    pub fn new(cache: Cache<S, E>, cost: LatencyCost, next: Arc<dyn LevelCache<S::Key, S::Value>>) -> Self {
        Self {
            cache,
            cost,
            next,
            lock: Mutex::new(()),
        }
    }

    /// The cache of this level.
    pub fn cache(&self) -> &Cache<S, E> {
        &self.cache
    }

    /// The simulated latency of this level.
    pub fn cost(&self) -> LatencyCost {
        self.cost
    }
}

impl<S, E> LevelCache<S::Key, S::Value> for DefaultCache<S, E>
where
    S: Storage,
    E: Eviction<Key = S::Key>,
{
    fn put(&self, key: S::Key, value: S::Value) -> PutResult {
        let _guard = self.lock.lock();

        let mut elapsed = self.cost.read_cost;
        if self.cache.get(&key).as_ref() == Some(&value) {
            tracing::trace!(?key, "[level]: value unchanged, skip write");
            return PutResult { elapsed };
        }

        self.cache.put(key.clone(), value.clone());
        elapsed += self.cost.write_cost;

        tracing::debug!(?key, "[level]: propagate write to next level");
        elapsed += self.next.put(key, value).elapsed;

        PutResult { elapsed }
    }

    fn get(&self, key: &S::Key) -> GetResult<S::Value> {
        let _guard = self.lock.lock();

        let mut elapsed = self.cost.read_cost;
        if let Some(value) = self.cache.get(key) {
            return GetResult {
                elapsed,
                value: Some(value),
            };
        }

        let res = self.next.get(key);
        elapsed += res.elapsed;

        if let Some(value) = &res.value {
            tracing::trace!(?key, "[level]: fill from next level");
            self.cache.put(key.clone(), value.clone());
            elapsed += self.cost.write_cost;
        }

        GetResult {
            elapsed,
            value: res.value,
        }
    }
}

/// The level after the last level: misses every read and drops every write, at no cost.
pub struct NullCache<K, V> {
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Debug for NullCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NullCache").finish()
    }
}

impl<K, V> Default for NullCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for NullCache<K, V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<K, V> NullCache<K, V> {
    /// Create the terminal level.
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<K, V> LevelCache<K, V> for NullCache<K, V>
where
    K: Key,
    V: Value,
{
    fn put(&self, _: K, _: V) -> PutResult {
        PutResult { elapsed: 0.0 }
    }

    fn get(&self, _: &K) -> GetResult<V> {
        GetResult {
            elapsed: 0.0,
            value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tiercache_memory::{Lru, LruCache, MapStorage};

    use super::*;

    type LruLevel = DefaultCache<MapStorage<String, u64>, Lru<String>>;

    /// Records the calls it receives and answers like a [`NullCache`] with a fixed cost.
    #[derive(Debug)]
    struct Recorder {
        puts: AtomicUsize,
        gets: AtomicUsize,
        cost: f64,
        value: Option<u64>,
    }

    impl Recorder {
        fn new(cost: f64, value: Option<u64>) -> Arc<Self> {
            Arc::new(Self {
                puts: AtomicUsize::new(0),
                gets: AtomicUsize::new(0),
                cost,
                value,
            })
        }
    }

    impl LevelCache<String, u64> for Recorder {
        fn put(&self, _: String, _: u64) -> PutResult {
            self.puts.fetch_add(1, Ordering::Relaxed);
            PutResult { elapsed: self.cost }
        }

        fn get(&self, _: &String) -> GetResult<u64> {
            self.gets.fetch_add(1, Ordering::Relaxed);
            GetResult {
                elapsed: self.cost,
                value: self.value,
            }
        }
    }

    fn level(capacity: usize, next: Arc<dyn LevelCache<String, u64>>) -> LruLevel {
        DefaultCache::new(LruCache::lru(capacity), LatencyCost::new(1.0, 2.0), next)
    }

    #[test]
    fn test_null_cache() {
        let null = NullCache::<u64, u64>::new();
        assert_eq!(null.put(1, 1), PutResult { elapsed: 0.0 });
        assert_eq!(
            null.get(&1),
            GetResult {
                elapsed: 0.0,
                value: None
            }
        );
    }

    #[test_log::test]
    fn test_put_propagation_suppressed_for_unchanged_value() {
        let next = Recorder::new(10.0, None);
        let l1 = level(1, next.clone());
        let x = "x".to_string();

        assert_eq!(l1.put(x.clone(), 1).elapsed, 1.0 + 2.0 + 10.0);
        assert_eq!(next.puts.load(Ordering::Relaxed), 1);

        let res = l1.get(&x);
        assert_eq!(res.value, Some(1));
        assert_eq!(res.elapsed, 1.0);
        assert_eq!(next.gets.load(Ordering::Relaxed), 0);

        assert_eq!(l1.put(x.clone(), 2).elapsed, 1.0 + 2.0 + 10.0);
        assert_eq!(next.puts.load(Ordering::Relaxed), 2);

        assert_eq!(l1.put(x.clone(), 2).elapsed, 1.0);
        assert_eq!(next.puts.load(Ordering::Relaxed), 2);
        assert_eq!(l1.cache().get(&x), Some(2));
    }

    #[test_log::test]
    fn test_get_fills_from_next_level() {
        let next = Recorder::new(10.0, Some(42));
        let l1 = level(4, next.clone());
        let k = "k".to_string();

        let res = l1.get(&k);
        assert_eq!(res.value, Some(42));
        assert_eq!(res.elapsed, 1.0 + 10.0 + 2.0);
        assert!(l1.cache().contains(&k));

        // Filled, no longer forwarded.
        let res = l1.get(&k);
        assert_eq!(res.value, Some(42));
        assert_eq!(res.elapsed, 1.0);
        assert_eq!(next.gets.load(Ordering::Relaxed), 1);
        // A fill is never written back downstream.
        assert_eq!(next.puts.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_get_miss_everywhere() {
        let l1 = level(4, Arc::new(NullCache::<String, u64>::new()));
        let res = l1.get(&"missing".to_string());
        assert_eq!(res.value, None);
        assert_eq!(res.elapsed, 1.0);
        assert!(l1.cache().is_empty());
    }

    #[test]
    fn test_evicted_entry_is_read_back_from_next_level() {
        let l2: Arc<LruLevel> = Arc::new(DefaultCache::new(
            LruCache::lru(8),
            LatencyCost::new(5.0, 10.0),
            Arc::new(NullCache::<String, u64>::new()),
        ));
        let l1 = level(1, l2);

        assert_eq!(l1.put("a".to_string(), 1).elapsed, 1.0 + 2.0 + 5.0 + 10.0);
        assert_eq!(l1.put("b".to_string(), 2).elapsed, 1.0 + 2.0 + 5.0 + 10.0);

        // "a" was evicted from L1 by "b", read through from L2 and filled into L1.
        let res = l1.get(&"a".to_string());
        assert_eq!(res.value, Some(1));
        assert_eq!(res.elapsed, 1.0 + 5.0 + 2.0);
        assert!(!l1.cache().contains(&"b".to_string()));
    }
}
