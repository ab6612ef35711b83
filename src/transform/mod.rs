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

//! Transforms applied to a collected sample set before it is rendered.

pub mod job_mapper;
pub mod scaling;

pub use job_mapper::{enrich, JobMapper};
pub use scaling::scale_value;

use crate::error::Result;
use crate::model::SampleSet;
use crate::topology::TopologyProvider;

/// A stage that rewrites a sample set in place.
pub trait Transform: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite `samples`. On error the set is left as it was.
    fn process(&self, samples: &mut SampleSet, topology: &dyn TopologyProvider) -> Result<()>;
}
