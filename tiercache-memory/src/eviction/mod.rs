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

use tiercache_common::code::Key;

/// Tracks the access order of keys and picks the next key to evict.
///
/// A [`Cache`](crate::Cache) keeps the policy in lock-step with its storage: a key is tracked if and only if it is
/// stored.
pub trait Eviction: Send + Sync + 'static {
    /// Key type.
    type Key: Key;

    /// Record that `key` was just read or written. Starts tracking `key` if it was not tracked.
    fn key_accessed(&mut self, key: &Self::Key);

    /// Stop tracking and return the next key to evict, or `None` if nothing is tracked.
    fn evict_key(&mut self) -> Option<Self::Key>;

    /// Returns `true` if `key` is tracked.
    fn contains(&self, key: &Self::Key) -> bool;

    /// Count of tracked keys.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in-first-out eviction.
pub mod fifo;
/// Least-recently-used eviction.
pub mod lru;
