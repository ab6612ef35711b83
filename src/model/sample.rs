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

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::config::AppConfig;
use crate::error::Error;

/// Entity class a sample was collected for. Each class renders with its own
/// label layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceGroup {
    Gpu,
    Switch,
    Link,
    Cpu,
    CpuCore,
}

impl DeviceGroup {
    /// Every group, in rendering order.
    pub const ALL: [DeviceGroup; 5] = [
        DeviceGroup::Gpu,
        DeviceGroup::Switch,
        DeviceGroup::Link,
        DeviceGroup::Cpu,
        DeviceGroup::CpuCore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceGroup::Gpu => "gpu",
            DeviceGroup::Switch => "switch",
            DeviceGroup::Link => "link",
            DeviceGroup::Cpu => "cpu",
            DeviceGroup::CpuCore => "cpu_core",
        }
    }
}

impl fmt::Display for DeviceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gpu" => Ok(DeviceGroup::Gpu),
            "switch" | "nvswitch" => Ok(DeviceGroup::Switch),
            "link" | "nvlink" => Ok(DeviceGroup::Link),
            "cpu" => Ok(DeviceGroup::Cpu),
            "cpu_core" | "cpucore" | "cpu-core" => Ok(DeviceGroup::CpuCore),
            _ => Err(Error::UnknownGroup(s.to_string())),
        }
    }
}

/// One measurement of a counter on one device or partition.
///
/// `device_index` is the collector's index for the entity. For the link and
/// CPU-core groups `device_name` holds the parent entity (the switch, or the
/// CPU the core belongs to).
///
/// `alt_value` and `alt_uuid` are filled by the enrichment stage. Until
/// then the renderer derives both from the collected fields. A resolved
/// `alt_uuid` of `Some("")` means the partition is unknown, and the empty
/// identity is rendered as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sample {
    pub device_index: String,
    pub device_uuid: String,
    /// Label name the device identity is exposed under, `UUID` when empty.
    pub uuid_label: String,
    pub device_name: String,
    pub model_name: String,
    pub pci_bus_id: String,
    /// Partition profile name, empty when the device is not partitioned.
    pub partition_profile: String,
    pub partition_instance_id: String,
    pub hostname: String,
    pub value: String,
    pub alt_value: String,
    pub alt_uuid: Option<String>,
    /// Extra labels, rendered in sorted key order. Insertion order is not
    /// kept, so output stays byte-identical however the map was built.
    pub labels: BTreeMap<String, String>,
    /// Enrichment data such as the job and user ids. Rendered after
    /// `labels`, also in sorted key order.
    pub attributes: BTreeMap<String, String>,
}

impl Sample {
    pub fn new(
        device_index: impl Into<String>,
        device_uuid: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            device_index: device_index.into(),
            device_uuid: device_uuid.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn is_partitioned(&self) -> bool {
        !self.partition_profile.is_empty()
    }

    /// Key joining this sample against job records: `"<index>.<instance>"`
    /// for a partition, the bare device index otherwise.
    pub fn device_key(&self) -> String {
        if self.is_partitioned() {
            format!("{}.{}", self.device_index, self.partition_instance_id)
        } else {
            self.device_index.clone()
        }
    }

    /// Identifier exposed for the device: the resolved one when enrichment
    /// ran, even if empty, and the collected device UUID otherwise.
    pub fn identity(&self) -> &str {
        self.alt_uuid.as_deref().unwrap_or(&self.device_uuid)
    }

    pub fn uuid_label(&self) -> &str {
        if self.uuid_label.is_empty() {
            AppConfig::DEFAULT_UUID_LABEL
        } else {
            &self.uuid_label
        }
    }
}
