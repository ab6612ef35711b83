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

//! Convenient re-exports of commonly used types.
//!
//! ```rust
//! use gpu_job_exporter::prelude::*;
//! ```

pub use crate::common::config::{AppConfig, ExporterConfig};
pub use crate::error::{Error, Result};
pub use crate::jobs::{read_job_directory, JobIndex, JobRecord};
pub use crate::model::{CounterDefinition, DeviceGroup, MetricKind, Sample, SampleSet};
pub use crate::pipeline::Pipeline;
pub use crate::render::{render_group, GroupMetricExporter, MetricExporter};
pub use crate::snapshot::Snapshot;
pub use crate::topology::{
    find_partition_uuid, DeviceTopology, DeviceTopologyEntry, PartitionInfo, TopologyProvider,
};
pub use crate::transform::{enrich, scale_value, JobMapper, Transform};
