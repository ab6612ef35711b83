// Copyright 2025 Lablup Inc. and Jeongkyu Shin
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

use std::sync::Arc;

use super::counter::CounterDefinition;
use super::sample::Sample;

/// Samples of one collection cycle, grouped by counter.
///
/// Counters keep their insertion order, which is the order they render in.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    entries: Vec<(Arc<CounterDefinition>, Vec<Sample>)>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `samples` under `counter`, returning the sequence it replaced.
    pub fn insert(
        &mut self,
        counter: Arc<CounterDefinition>,
        samples: Vec<Sample>,
    ) -> Option<Vec<Sample>> {
        match self.position(&counter) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, samples)),
            None => {
                self.entries.push((counter, samples));
                None
            }
        }
    }

    /// Append one sample to the counter's sequence.
    pub fn push(&mut self, counter: &Arc<CounterDefinition>, sample: Sample) {
        match self.position(counter) {
            Some(i) => self.entries[i].1.push(sample),
            None => self.entries.push((Arc::clone(counter), vec![sample])),
        }
    }

    pub fn get(&self, counter: &CounterDefinition) -> Option<&[Sample]> {
        self.entries
            .iter()
            .find(|(c, _)| c.as_ref() == counter)
            .map(|(_, samples)| samples.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<CounterDefinition>, &[Sample])> {
        self.entries.iter().map(|(c, s)| (c, s.as_slice()))
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (&Arc<CounterDefinition>, &mut Vec<Sample>)> {
        self.entries.iter_mut().map(|(c, s)| (&*c, s))
    }

    /// Every sample of every counter.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.entries.iter().flat_map(|(_, s)| s.iter())
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.entries.iter().map(|(_, s)| s.len()).sum()
    }

    fn position(&self, counter: &CounterDefinition) -> Option<usize> {
        self.entries.iter().position(|(c, _)| c.as_ref() == counter)
    }
}
