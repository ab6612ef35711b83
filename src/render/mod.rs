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

//! Prometheus text exposition of enriched sample sets.
//!
//! Each counter renders as:
//!
//! ```text
//! # HELP <name> <help>
//! # TYPE <name> <kind>
//! <name>{<group labels>,<sample labels>,<attributes>} <value>
//! ```
//!
//! GPU counters with an alternate name repeat the block under that name with
//! the scaled value, and the GPU group ends with the job id and job owner
//! gauges.

pub mod builder;
pub mod job_gauges;
pub mod layout;

use std::borrow::Cow;
use std::io::Write;

pub use builder::MetricBuilder;

use crate::error::Result;
use crate::model::{DeviceGroup, SampleSet};
use crate::transform::scale_value;

/// Trait for exporting metrics in Prometheus format
pub trait MetricExporter {
    /// Export metrics to Prometheus format string
    fn export_metrics(&self) -> String;
}

/// Exporter for the sample set of one device group.
pub struct GroupMetricExporter<'a> {
    pub group: DeviceGroup,
    pub samples: &'a SampleSet,
}

impl<'a> GroupMetricExporter<'a> {
    pub fn new(group: DeviceGroup, samples: &'a SampleSet) -> Self {
        Self { group, samples }
    }

    fn export_counters(&self, builder: &mut MetricBuilder) {
        for (counter, samples) in self.samples.iter() {
            builder
                .help(&counter.name, &counter.help)
                .type_(&counter.name, counter.kind.as_str());
            for sample in samples {
                builder.metric(
                    &counter.name,
                    &layout::primary_labels(self.group, sample),
                    &sample.value,
                );
            }

            if self.group != DeviceGroup::Gpu {
                continue;
            }
            let Some(alt_name) = counter.alt_name.as_deref() else {
                continue;
            };
            builder
                .help(alt_name, counter.alt_help.as_deref().unwrap_or(&counter.help))
                .type_(alt_name, counter.kind.as_str());
            for sample in samples {
                let value = if sample.alt_value.is_empty() {
                    Cow::Owned(scale_value(&sample.value, counter.multiplier))
                } else {
                    Cow::Borrowed(sample.alt_value.as_str())
                };
                builder.metric(alt_name, &layout::alternate_labels(sample), &value);
            }
        }
    }
}

impl MetricExporter for GroupMetricExporter<'_> {
    fn export_metrics(&self) -> String {
        let mut builder = MetricBuilder::new();
        self.export_counters(&mut builder);
        if self.group == DeviceGroup::Gpu {
            job_gauges::export_job_gauges(&mut builder, self.samples);
        }
        builder.build()
    }
}

/// Render `samples` with the layout of `group` and write the text to `w`.
///
/// The text is built in full before the single write, so a failed write is
/// the only error.
pub fn render_group<W: Write + ?Sized>(
    w: &mut W,
    group: DeviceGroup,
    samples: &SampleSet,
) -> Result<()> {
    let text = GroupMetricExporter::new(group, samples).export_metrics();
    w.write_all(text.as_bytes())?;
    Ok(())
}
