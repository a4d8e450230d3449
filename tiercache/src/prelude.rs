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

pub use tiercache_common::{
    code::{Key, Value},
    error::{Error, ErrorKind, Result},
};
pub use tiercache_memory::{
    Cache, Eviction, EvictionConfig, Fifo, FifoCache, Full, Lru, LruCache, MapStorage, Metrics, NotFound, Storage,
};

pub use crate::{
    builder::MultilevelCacheBuilder,
    config::{LatencyCost, LevelConfig, ServiceConfig, DEFAULT_STATS_WINDOW},
    level::{DefaultCache, GetResult, LevelCache, NullCache, PutResult},
    service::{MultilevelCacheService, Stats},
    stats::StatsWindow,
};
