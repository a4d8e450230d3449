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

use serde::{Deserialize, Serialize};
use tiercache_common::error::{Error, Result};
use tiercache_memory::EvictionConfig;

/// Default length of the latency windows of a [`MultilevelCacheService`](crate::MultilevelCacheService).
pub const DEFAULT_STATS_WINDOW: usize = 100;

/// Simulated latency of the operations on one level.
///
/// The costs are not measured. A level adds `read_cost` for every lookup and `write_cost` for every write it
/// performs, in whatever unit the caller chooses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyCost {
    /// Cost of one lookup.
    pub read_cost: f64,
    /// Cost of one write.
    pub write_cost: f64,
}

impl LatencyCost {
    /// Create a latency cost.
    pub fn new(read_cost: f64, write_cost: f64) -> Self {
        Self { read_cost, write_cost }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, cost) in [("read_cost", self.read_cost), ("write_cost", self.write_cost)] {
            if !cost.is_finite() || cost < 0.0 {
                return Err(Error::config("latency cost must be a finite non-negative number")
                    .with_context("field", name)
                    .with_context("value", cost));
            }
        }
        Ok(())
    }
}

/// Config of one cache level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Max count of entries the level holds.
    pub capacity: usize,
    /// Eviction algorithm of the level.
    #[serde(default)]
    pub eviction: EvictionConfig,
    /// Simulated latency of the level.
    #[serde(default)]
    pub cost: LatencyCost,
}

impl LevelConfig {
    /// Create a level config with LRU eviction and zero cost.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            eviction: EvictionConfig::default(),
            cost: LatencyCost::default(),
        }
    }

    /// Set the eviction algorithm.
    pub fn with_eviction(mut self, eviction: EvictionConfig) -> Self {
        self.eviction = eviction;
        self
    }

    /// Set the simulated latency.
    pub fn with_cost(mut self, cost: LatencyCost) -> Self {
        self.cost = cost;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::config("level capacity must be greater than 0"));
        }
        self.cost.validate()
    }
}

/// Config of a [`MultilevelCacheService`](crate::MultilevelCacheService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Levels from the first (L1) to the last.
    pub levels: Vec<LevelConfig>,
    /// Count of recent samples the latency averages are computed over.
    #[serde(default = "default_stats_window")]
    pub stats_window: usize,
}

fn default_stats_window() -> usize {
    DEFAULT_STATS_WINDOW
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            levels: vec![],
            stats_window: DEFAULT_STATS_WINDOW,
        }
    }
}

impl ServiceConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::config("at least one level is required"));
        }
        if self.stats_window == 0 {
            return Err(Error::config("stats window must be greater than 0"));
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate().map_err(|e| e.with_context("level", i + 1))?;
        }
        Ok(())
    }
}
