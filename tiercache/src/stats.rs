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

use std::collections::VecDeque;

use tiercache_common::strict_assert;

/// A fixed-length FIFO window of latency samples.
///
/// Pushing a sample into a full window drops the oldest sample.
#[derive(Debug, Clone)]
pub struct StatsWindow {
    samples: VecDeque<f64>,
    size: usize,
}

impl StatsWindow {
    /// Create an empty window holding at most `size` samples.
    ///
    /// # Panic
    ///
    /// Panics if `size` is 0.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "stats window size must be greater than 0");
        Self {
            samples: VecDeque::with_capacity(size),
            size,
        }
    }

    /// Append a sample.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.size {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        strict_assert!(self.samples.len() <= self.size);
    }

    /// Arithmetic mean of the samples in the window, `0.0` if it is empty.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Samples in the window, from the oldest to the newest.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Count of samples in the window.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the window has no sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Max count of samples in the window.
    pub fn size(&self) -> usize {
        self.size
    }
}
