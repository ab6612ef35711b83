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

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exposition type of a counter, as written on its `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Gauge,
    Counter,
    Label,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
            MetricKind::Label => "label",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_multiplier() -> i64 {
    1
}

/// A collected field and how it is presented.
///
/// A definition may declare an alternate name: every sample of the counter
/// is then exposed a second time under that name, with its value scaled by
/// `multiplier` (for example MiB reported as bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterDefinition {
    pub field_id: u32,
    pub name: String,
    #[serde(default)]
    pub alt_name: Option<String>,
    #[serde(default)]
    pub kind: MetricKind,
    #[serde(default = "default_multiplier")]
    pub multiplier: i64,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub alt_help: Option<String>,
}

impl CounterDefinition {
    pub fn new(
        field_id: u32,
        name: impl Into<String>,
        kind: MetricKind,
        help: impl Into<String>,
    ) -> Self {
        Self {
            field_id,
            name: name.into(),
            alt_name: None,
            kind,
            multiplier: 1,
            help: help.into(),
            alt_help: None,
        }
    }

    /// Declare the alternate presentation of this counter.
    pub fn with_alternate(
        mut self,
        alt_name: impl Into<String>,
        alt_help: impl Into<String>,
        multiplier: i64,
    ) -> Self {
        self.alt_name = Some(alt_name.into());
        self.alt_help = Some(alt_help.into());
        self.multiplier = multiplier;
        self
    }
}
