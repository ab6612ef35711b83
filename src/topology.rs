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

//! Device topology lookups needed to attribute partition samples.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// A hardware partition of a device and its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInfo {
    pub instance_id: u32,
    pub uuid: String,
}

/// Read-only view of the devices known to the collection layer.
pub trait TopologyProvider: Send + Sync {
    /// Number of physical devices.
    fn device_count(&self) -> usize;

    /// Partitions of the device at `device`. Callers must pass an index
    /// below [`TopologyProvider::device_count`].
    fn partitions(&self, device: usize) -> &[PartitionInfo];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTopologyEntry {
    #[serde(default)]
    pub partitions: Vec<PartitionInfo>,
}

/// Topology snapshot handed over by the collection layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTopology {
    #[serde(default)]
    pub devices: Vec<DeviceTopologyEntry>,
}

impl DeviceTopology {
    pub fn new(devices: Vec<DeviceTopologyEntry>) -> Self {
        Self { devices }
    }

    /// Topology of `count` devices without partitions.
    pub fn with_devices(count: usize) -> Self {
        Self {
            devices: vec![DeviceTopologyEntry::default(); count],
        }
    }
}

impl TopologyProvider for DeviceTopology {
    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn partitions(&self, device: usize) -> &[PartitionInfo] {
        self.devices
            .get(device)
            .map(|d| d.partitions.as_slice())
            .unwrap_or(&[])
    }
}

/// Resolve the stable identifier of partition `instance_id` on device
/// `device_index`.
///
/// An index that is not an integer or lies outside the topology means the
/// collection layer is broken and yields a fatal error. A valid device
/// without the requested partition logs a warning and resolves to an empty
/// string.
pub fn find_partition_uuid(
    topology: &dyn TopologyProvider,
    device_index: &str,
    instance_id: &str,
) -> Result<String> {
    let device: u32 = device_index
        .parse()
        .map_err(|_| Error::DeviceIndexInvalid {
            index: device_index.to_string(),
        })?;

    let count = topology.device_count();
    if device as usize >= count {
        return Err(Error::DeviceIndexOutOfRange {
            index: device,
            count,
        });
    }

    let instance: u32 = instance_id
        .parse()
        .map_err(|_| Error::PartitionIdInvalid {
            device: device_index.to_string(),
            instance: instance_id.to_string(),
        })?;

    if let Some(partition) = topology
        .partitions(device as usize)
        .iter()
        .find(|p| p.instance_id == instance)
    {
        return Ok(partition.uuid.clone());
    }

    warn!(
        "Got metric for device #{device_index} and partition instance id {instance_id} that is not in the topology"
    );
    Ok(String::new())
}
