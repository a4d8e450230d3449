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

use tiercache::{EvictionConfig, LatencyCost, LevelConfig, MultilevelCacheBuilder};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let service = MultilevelCacheBuilder::<String, String>::new()
        .with_level(LevelConfig::new(5).with_cost(LatencyCost::new(1.0, 2.0)))
        .with_level(
            LevelConfig::new(50)
                .with_eviction(EvictionConfig::Fifo)
                .with_cost(LatencyCost::new(5.0, 10.0)),
        )
        .with_level(LevelConfig::new(500).with_cost(LatencyCost::new(20.0, 40.0)))
        .with_stats_window(5)
        .build()?;

    let key = "example_key".to_string();
    let value = "example_value".to_string();

    let res = service.put(key.clone(), value);
    println!("put: elapsed = {}", res.elapsed);

    let res = service.get(&key);
    println!("get: elapsed = {}, value = {:?}", res.elapsed, res.value);

    let stats = service.stats();
    println!("stats: avg read = {}, avg write = {}", stats.avg_read, stats.avg_write);

    Ok(())
}
