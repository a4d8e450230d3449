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

use std::{fmt::Debug, sync::Arc};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tiercache_common::code::{Key, Value};

use crate::{
    level::{GetResult, LevelCache, PutResult},
    stats::StatsWindow,
};

/// Average simulated latencies over the recent operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Average latency of recent reads.
    pub avg_read: f64,
    /// Average latency of recent writes.
    pub avg_write: f64,
}

#[derive(Debug)]
struct Windows {
    reads: StatsWindow,
    writes: StatsWindow,
}

/// Entry point of a chain of cache levels.
///
/// Every operation is forwarded to the first level and the latency it reports is recorded into a sliding window,
/// reads and writes separately.
pub struct MultilevelCacheService<K, V>
where
    K: Key,
    V: Value,
{
    l1: Arc<dyn LevelCache<K, V>>,
    windows: Mutex<Windows>,
}

impl<K, V> Debug for MultilevelCacheService<K, V>
where
    K: Key,
    V: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultilevelCacheService")
            .field("l1", &self.l1)
            .field("windows", &self.windows)
            .finish()
    }
}

impl<K, V> MultilevelCacheService<K, V>
where
    K: Key,
    V: Value,
{
    /// Create a service over the first level `l1`, averaging over the last `window` samples.
    ///
    /// # Panic
    ///
    /// Panics if `window` is 0.
    pub fn new(l1: Arc<dyn LevelCache<K, V>>, window: usize) -> Self {
        Self {
            l1,
            windows: Mutex::new(Windows {
                reads: StatsWindow::new(window),
                writes: StatsWindow::new(window),
            }),
        }
    }

    /// Write an entry through the chain.
    pub fn put(&self, key: K, value: V) -> PutResult {
        let mut windows = self.windows.lock();
        let res = self.l1.put(key, value);
        windows.writes.push(res.elapsed);
        res
    }

    /// Read an entry through the chain.
    pub fn get(&self, key: &K) -> GetResult<V> {
        let mut windows = self.windows.lock();
        let res = self.l1.get(key);
        windows.reads.push(res.elapsed);
        res
    }

    /// Average latency of the recent reads, `0.0` if there is none.
    pub fn read_average(&self) -> f64 {
        self.windows.lock().reads.average()
    }

    /// Average latency of the recent writes, `0.0` if there is none.
    pub fn write_average(&self) -> f64 {
        self.windows.lock().writes.average()
    }

    /// Both averages, taken together.
    pub fn stats(&self) -> Stats {
        let windows = self.windows.lock();
        Stats {
            avg_read: windows.reads.average(),
            avg_write: windows.writes.average(),
        }
    }
}
