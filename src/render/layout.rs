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

//! Per-group label layouts.

use crate::model::{DeviceGroup, Sample};

/// Labels of a sample line under the counter's primary name.
pub fn primary_labels(group: DeviceGroup, sample: &Sample) -> Vec<(&str, &str)> {
    let mut labels = Vec::with_capacity(8 + sample.labels.len() + sample.attributes.len());

    match group {
        DeviceGroup::Gpu => {
            labels.push(("gpu", sample.device_index.as_str()));
            labels.push((sample.uuid_label(), sample.identity()));
            labels.push(("pci_bus_id", sample.pci_bus_id.as_str()));
            labels.push(("device", sample.device_name.as_str()));
            labels.push(("modelName", sample.model_name.as_str()));
            push_partition(&mut labels, sample);
        }
        DeviceGroup::Switch => {
            labels.push(("nvswitch", sample.device_index.as_str()));
        }
        DeviceGroup::Link => {
            labels.push(("nvlink", sample.device_index.as_str()));
            labels.push(("nvswitch", sample.device_name.as_str()));
        }
        DeviceGroup::Cpu => {
            labels.push(("cpu", sample.device_index.as_str()));
        }
        DeviceGroup::CpuCore => {
            labels.push(("cpucore", sample.device_index.as_str()));
            labels.push(("cpu", sample.device_name.as_str()));
        }
    }

    push_hostname(&mut labels, sample);
    push_labels(&mut labels, sample);
    // Only GPU samples carry job attribution.
    if group == DeviceGroup::Gpu {
        push_attributes(&mut labels, sample);
    }
    labels
}

/// Labels of a GPU sample line under the counter's alternate name.
pub fn alternate_labels(sample: &Sample) -> Vec<(&str, &str)> {
    let mut labels = Vec::with_capacity(8 + sample.labels.len() + sample.attributes.len());
    labels.push(("minor_number", sample.device_index.as_str()));
    labels.push(("uuid", sample.identity()));
    labels.push(("device", sample.device_name.as_str()));
    labels.push(("modelName", sample.model_name.as_str()));
    push_partition(&mut labels, sample);
    push_hostname(&mut labels, sample);
    push_labels(&mut labels, sample);
    push_attributes(&mut labels, sample);
    labels
}

fn push_partition<'a>(labels: &mut Vec<(&'a str, &'a str)>, sample: &'a Sample) {
    if sample.is_partitioned() {
        labels.push(("GPU_I_PROFILE", sample.partition_profile.as_str()));
        labels.push(("GPU_I_ID", sample.partition_instance_id.as_str()));
    }
}

fn push_hostname<'a>(labels: &mut Vec<(&'a str, &'a str)>, sample: &'a Sample) {
    if !sample.hostname.is_empty() {
        labels.push(("Hostname", sample.hostname.as_str()));
    }
}

fn push_labels<'a>(labels: &mut Vec<(&'a str, &'a str)>, sample: &'a Sample) {
    labels.extend(sample.labels.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}

fn push_attributes<'a>(labels: &mut Vec<(&'a str, &'a str)>, sample: &'a Sample) {
    labels.extend(
        sample
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );
}
