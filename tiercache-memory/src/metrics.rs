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

/// Operation counters of a [`Cache`](crate::Cache).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// successful inserts of new keys
    pub insert: usize,
    /// successful overwrites of present keys
    pub replace: usize,

    /// get hits
    pub hit: usize,
    /// get misses
    pub miss: usize,

    /// entries evicted to make room for a new key
    pub evict: usize,
}
