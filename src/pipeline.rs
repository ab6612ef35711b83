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

//! One enrichment-and-render pass over a collection snapshot.

use std::io::Write;

use tracing::{debug, error};

use crate::common::config::ExporterConfig;
use crate::error::Result;
use crate::model::{DeviceGroup, SampleSet};
use crate::render::{GroupMetricExporter, MetricExporter};
use crate::snapshot::Snapshot;
use crate::topology::TopologyProvider;
use crate::transform::{JobMapper, Transform};

/// Configured transforms plus the rendering of their result.
pub struct Pipeline {
    config: ExporterConfig,
    transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Build the pipeline described by `config`. Job attribution is enabled
    /// when a job mapping directory is configured.
    pub fn new(config: ExporterConfig) -> Self {
        let mut transforms: Vec<Box<dyn Transform>> = Vec::new();
        if let Some(dir) = config.job_dir() {
            transforms.push(Box::new(JobMapper::new(dir)));
        }
        Self { config, transforms }
    }

    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    pub fn transform_names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Run every transform over `samples`.
    ///
    /// A fatal error is returned as is. Any other failure is logged and the
    /// samples keep whatever the previous transforms produced, so the pass
    /// still exposes data.
    pub fn enrich(&self, samples: &mut SampleSet, topology: &dyn TopologyProvider) -> Result<()> {
        for transform in &self.transforms {
            match transform.process(samples, topology) {
                Ok(()) => debug!("Transform {} done", transform.name()),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => error!(
                    "Transform {} failed, exposing samples without it: {e}",
                    transform.name()
                ),
            }
        }
        Ok(())
    }

    /// Enrich the GPU group of `snapshot` and render every group.
    pub fn render_pass(&self, snapshot: &Snapshot) -> Result<String> {
        let mut groups = snapshot.groups().to_vec();
        self.config.apply_defaults(&mut groups);

        for (group, samples) in groups.iter_mut() {
            if *group == DeviceGroup::Gpu {
                self.enrich(samples, &snapshot.topology)?;
            }
        }

        let mut out = String::new();
        for (group, samples) in &groups {
            if samples.is_empty() {
                continue;
            }
            out.push_str(&GroupMetricExporter::new(*group, samples).export_metrics());
        }
        Ok(out)
    }

    /// Run one pass and write its output to `w` in a single write.
    pub fn run_pass<W: Write + ?Sized>(&self, snapshot: &Snapshot, w: &mut W) -> Result<()> {
        let text = self.render_pass(snapshot)?;
        w.write_all(text.as_bytes())?;
        Ok(())
    }
}
