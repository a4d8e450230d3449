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

use std::{fmt::Debug, hash::Hash};

/// Key trait for the cache.
///
/// Keys are only hashed and compared for equality.
pub trait Key: Send + Sync + 'static + Hash + Eq + Clone + Debug {}
impl<T: Send + Sync + 'static + Hash + Eq + Clone + Debug> Key for T {}

/// Value trait for the cache.
///
/// Values are compared with [`PartialEq`] when a level decides whether a write changes what it holds, so the
/// equality must be structural. A value type that compares by identity will propagate every write downstream.
pub trait Value: Send + Sync + 'static + Clone + PartialEq + Debug {}
impl<T: Send + Sync + 'static + Clone + PartialEq + Debug> Value for T {}
