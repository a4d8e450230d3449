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

//! tiercache - a multi-level in-memory cache.
//!
//! Levels are chained: a read that misses one level is forwarded to the next and the value found is filled back,
//! a write that changes a level's value is forwarded to the next. Every level reports a simulated latency, and
//! [`MultilevelCacheService`] keeps a sliding window of the latencies of recent operations.
//!
//! ```
//! use tiercache::{LatencyCost, LevelConfig, MultilevelCacheBuilder};
//!
//! let service = MultilevelCacheBuilder::<String, String>::new()
//!     .with_level(LevelConfig::new(16).with_cost(LatencyCost::new(1.0, 2.0)))
//!     .with_level(LevelConfig::new(256).with_cost(LatencyCost::new(5.0, 10.0)))
//!     .with_stats_window(8)
//!     .build()
//!     .unwrap();
//!
//! service.put("hello".to_string(), "world".to_string());
//! let res = service.get(&"hello".to_string());
//! assert_eq!(res.value.as_deref(), Some("world"));
//! assert_eq!(res.elapsed, 1.0);
//! ```

mod builder;
mod config;
mod level;
mod service;
mod stats;

mod prelude;
pub use prelude::*;
