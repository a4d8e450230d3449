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

use std::{marker::PhantomData, sync::Arc};

use tiercache_common::{
    code::{Key, Value},
    error::Result,
};
use tiercache_memory::{EvictionConfig, FifoCache, LruCache};

use crate::{
    config::{LevelConfig, ServiceConfig},
    level::{DefaultCache, LevelCache, NullCache},
    service::MultilevelCacheService,
};

/// Builder of a [`MultilevelCacheService`].
///
/// Levels are added from the first (L1) to the last. The chain is closed with a [`NullCache`].
#[derive(Debug, Clone)]
pub struct MultilevelCacheBuilder<K, V> {
    config: ServiceConfig,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Default for MultilevelCacheBuilder<K, V>
where
    K: Key,
    V: Value,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MultilevelCacheBuilder<K, V>
where
    K: Key,
    V: Value,
{
    /// Create a builder with no level and the default stats window.
    pub fn new() -> Self {
        Self::from_config(ServiceConfig::default())
    }

    /// Create a builder from a complete config.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    /// Append a level after the levels added so far.
    pub fn with_level(mut self, level: LevelConfig) -> Self {
        self.config.levels.push(level);
        self
    }

    /// Set the count of recent samples the latency averages are computed over.
    ///
    /// The default value is 100.
    pub fn with_stats_window(mut self, stats_window: usize) -> Self {
        self.config.stats_window = stats_window;
        self
    }

    /// Build the service.
    ///
    /// Fails with [`ErrorKind::Config`](tiercache_common::error::ErrorKind::Config) if there is no level, if the stats
    /// window is 0, or if a level has a zero capacity or a negative cost.
    pub fn build(self) -> Result<MultilevelCacheService<K, V>> {
        self.config.validate()?;

        let mut next: Arc<dyn LevelCache<K, V>> = Arc::new(NullCache::<K, V>::new());
        for level in self.config.levels.iter().rev() {
            next = Self::level(level, next);
        }

        tracing::debug!(
            levels = self.config.levels.len(),
            stats_window = self.config.stats_window,
            "[builder]: build multilevel cache service"
        );

        Ok(MultilevelCacheService::new(next, self.config.stats_window))
    }

    fn level(config: &LevelConfig, next: Arc<dyn LevelCache<K, V>>) -> Arc<dyn LevelCache<K, V>> {
        match config.eviction {
            EvictionConfig::Lru => Arc::new(DefaultCache::new(LruCache::<K, V>::lru(config.capacity), config.cost, next)),
            EvictionConfig::Fifo => {
                Arc::new(DefaultCache::new(FifoCache::<K, V>::fifo(config.capacity), config.cost, next))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tiercache_common::error::ErrorKind;

    use super::*;
    use crate::config::LatencyCost;

    #[test]
    fn test_build_without_level() {
        let err = MultilevelCacheBuilder::<u64, u64>::new().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_build_rejects_zero_window() {
        let err = MultilevelCacheBuilder::<u64, u64>::new()
            .with_level(LevelConfig::new(1))
            .with_stats_window(0)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test_log::test]
    fn test_build_chain_in_order() {
        let service = MultilevelCacheBuilder::<u64, u64>::new()
            .with_level(LevelConfig::new(1).with_cost(LatencyCost::new(1.0, 2.0)))
            .with_level(
                LevelConfig::new(4)
                    .with_eviction(EvictionConfig::Fifo)
                    .with_cost(LatencyCost::new(10.0, 20.0)),
            )
            .with_level(LevelConfig::new(16).with_cost(LatencyCost::new(100.0, 200.0)))
            .build()
            .unwrap();

        assert_eq!(service.put(1, 1).elapsed, 333.0);
        // L1 hit.
        assert_eq!(service.get(&1).elapsed, 1.0);

        // Evicts 1 from L1.
        service.put(2, 2);
        // L1 miss, L2 hit, fill L1.
        let res = service.get(&1);
        assert_eq!(res.value, Some(1));
        assert_eq!(res.elapsed, 1.0 + 10.0 + 2.0);
    }

    #[test]
    fn test_build_from_config() {
        let config = ServiceConfig {
            levels: vec![LevelConfig::new(2), LevelConfig::new(8)],
            stats_window: 3,
        };
        let service = MultilevelCacheBuilder::<String, String>::from_config(config).build().unwrap();
        service.put("k".to_string(), "v".to_string());
        assert_eq!(service.get(&"k".to_string()).value.as_deref(), Some("v"));
        assert_eq!(service.stats().avg_write, 0.0);
    }
}
