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

//! JSON snapshots of a collection cycle.
//!
//! The collection layer is external to this crate. A snapshot file carries
//! what it would hand over: the device topology and the samples of each
//! device group, grouped by counter.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CounterDefinition, DeviceGroup, Sample, SampleSet};
use crate::topology::DeviceTopology;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    topology: DeviceTopology,
    #[serde(default)]
    groups: Vec<GroupFile>,
}

#[derive(Debug, Deserialize)]
struct GroupFile {
    group: DeviceGroup,
    #[serde(default)]
    counters: Vec<CounterFile>,
}

#[derive(Debug, Deserialize)]
struct CounterFile {
    counter: CounterDefinition,
    #[serde(default)]
    samples: Vec<Sample>,
}

/// One collection cycle: topology plus per-group sample sets.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub topology: DeviceTopology,
    groups: Vec<(DeviceGroup, SampleSet)>,
}

impl Snapshot {
    pub fn new(topology: DeviceTopology) -> Self {
        Self {
            topology,
            groups: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(text)?;
        let mut snapshot = Self::new(file.topology);
        for group in file.groups {
            let set = snapshot.group_mut(group.group);
            for entry in group.counters {
                let counter = Arc::new(entry.counter);
                for sample in entry.samples {
                    set.push(&counter, sample);
                }
                if set.get(&counter).is_none() {
                    set.insert(counter, Vec::new());
                }
            }
        }
        Ok(snapshot)
    }

    /// Sample set of `group`, created empty on first access.
    pub fn group_mut(&mut self, group: DeviceGroup) -> &mut SampleSet {
        let pos = match self.groups.iter().position(|(g, _)| *g == group) {
            Some(pos) => pos,
            None => {
                self.groups.push((group, SampleSet::new()));
                self.groups.sort_by_key(|(g, _)| *g);
                self.groups
                    .iter()
                    .position(|(g, _)| *g == group)
                    .unwrap_or(self.groups.len() - 1)
            }
        };
        &mut self.groups[pos].1
    }

    pub fn group(&self, group: DeviceGroup) -> Option<&SampleSet> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, set)| set)
    }

    /// Groups in rendering order.
    pub fn groups(&self) -> &[(DeviceGroup, SampleSet)] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<(DeviceGroup, SampleSet)> {
        self.groups
    }
}
