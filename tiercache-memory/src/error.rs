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

/// Returned by [`Storage::put`](crate::Storage::put) when a new key cannot be inserted at the current capacity.
///
/// The rejected entry is handed back so the caller can retry the write after making room.
#[derive(thiserror::Error, Debug)]
#[error("storage is full, capacity: {capacity}")]
pub struct Full<K, V> {
    /// Key of the rejected entry.
    pub key: K,
    /// Value of the rejected entry.
    pub value: V,
    /// Capacity of the storage that rejected the entry.
    pub capacity: usize,
}

impl<K, V> Full<K, V> {
    /// Take back the rejected entry.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Returned by [`Storage::get`](crate::Storage::get) when the key is absent.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("key not found")]
pub struct NotFound;
