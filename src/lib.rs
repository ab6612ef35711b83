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

//! Job attribution and Prometheus rendering for GPU telemetry samples.
//!
//! A collection cycle hands over a [`model::SampleSet`] per device group and
//! a [`topology::TopologyProvider`]. The [`pipeline::Pipeline`] enriches the
//! GPU samples with the jobs found in a scheduler-maintained mapping
//! directory and renders every group in the text exposition format.
//!
//! # Example
//!
//! ```rust,no_run
//! use gpu_job_exporter::prelude::*;
//!
//! fn main() -> gpu_job_exporter::Result<()> {
//!     let snapshot = Snapshot::new(DeviceTopology::with_devices(1));
//!     let pipeline = Pipeline::new(ExporterConfig::new().job_mapping_dir("/run/gpustat"));
//!     pipeline.run_pass(&snapshot, &mut std::io::stdout())
//! }
//! ```

pub mod common {
    pub mod config;
}
pub mod error;
pub mod jobs;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod render;
pub mod snapshot;
pub mod topology;
pub mod transform;

pub use error::{Error, Result};
