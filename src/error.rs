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

//! Error types for the enrichment and rendering pipeline.
//!
//! Errors fall into three groups:
//!
//! - **Fatal**: the collection layer handed us a sample whose device or
//!   partition coordinates do not exist in the topology. Continuing would
//!   attribute jobs to the wrong device, so the pass must stop.
//! - **Propagated I/O**: listing or reading the job mapping directory, or
//!   writing to the output sink, failed.
//! - **Input**: a device group tag that does not name a known group.
//!
//! Recoverable conditions (missing job directory, malformed job lines,
//! unknown partitions) are logged where they happen and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A sample carried a device index that is not a non-negative integer.
    #[error("Got metric with device index {index:?} that is not a non-negative integer")]
    DeviceIndexInvalid { index: String },

    /// A sample carried a device index beyond the known device count.
    #[error("Got metric with device index {index} which is not below the device count {count}")]
    DeviceIndexOutOfRange { index: u32, count: usize },

    /// A partitioned sample carried an instance id that is not an integer.
    #[error(
        "Got metric for device #{device} and partition instance id {instance:?} that is not a non-negative integer"
    )]
    PartitionIdInvalid { device: String, instance: String },

    /// Listing or reading the job mapping directory failed.
    #[error("Failed to read job mapping {}: {source}", .path.display())]
    JobDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The device group tag is not one of the known groups.
    #[error("Unexpected device group: {0}")]
    UnknownGroup(String),

    /// An I/O error occurred, typically while writing to the output sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error indicates broken upstream data that must abort the pass.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::DeviceIndexInvalid { .. }
                | Error::DeviceIndexOutOfRange { .. }
                | Error::PartitionIdInvalid { .. }
        )
    }
}

/// A specialized Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
