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

//! Single-level in-memory cache for tiercache.
//!
//! A [`Cache`] binds a capacity-bounded [`Storage`] to an [`Eviction`] policy. When the storage refuses a new key
//! because it is full, the cache evicts the candidate picked by the policy and retries the write once.

mod cache;
mod error;
mod eviction;
mod metrics;
mod order;
mod storage;

mod prelude;
pub use prelude::*;
