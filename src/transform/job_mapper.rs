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

//! Attribution of GPU samples to the scheduler jobs running on them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::scaling::scale_value;
use super::Transform;
use crate::common::config::AppConfig;
use crate::error::Result;
use crate::jobs::{read_job_directory, JobIndex, JobRecord};
use crate::model::{Sample, SampleSet};
use crate::topology::{find_partition_uuid, TopologyProvider};

/// Reads the job mapping directory on every pass and fans each sample out
/// into one copy per job running on its device.
#[derive(Debug, Clone)]
pub struct JobMapper {
    job_dir: PathBuf,
}

impl JobMapper {
    pub fn new(job_dir: impl Into<PathBuf>) -> Self {
        let job_dir = job_dir.into();
        info!("Job mapping is enabled and watching the {job_dir:?} directory");
        Self { job_dir }
    }

    pub fn job_dir(&self) -> &Path {
        &self.job_dir
    }
}

impl Transform for JobMapper {
    fn name(&self) -> &'static str {
        "job_mapper"
    }

    fn process(&self, samples: &mut SampleSet, topology: &dyn TopologyProvider) -> Result<()> {
        let index = read_job_directory(&self.job_dir)?;
        debug!("Job mapping: {} device entries loaded", index.len());
        enrich(samples, &index, topology)
    }
}

/// Enrich every sample of `samples` against `index`.
///
/// For each sample the alternate value is computed, the device identity is
/// resolved (once per device key and call) and stored as the alternate
/// UUID, and the sample is replaced by one copy per job record found for
/// the device. Samples without job records are kept as they are.
///
/// A fatal topology error aborts the call and leaves `samples` untouched.
pub fn enrich(
    samples: &mut SampleSet,
    index: &JobIndex,
    topology: &dyn TopologyProvider,
) -> Result<()> {
    let mut identities: HashMap<String, String> = HashMap::new();
    let mut enriched = Vec::with_capacity(samples.len());

    for (counter, sequence) in samples.iter() {
        let mut out = Vec::with_capacity(sequence.len());

        for sample in sequence {
            let mut sample = sample.clone();
            sample.alt_value = scale_value(&sample.value, counter.multiplier);

            let device_key = sample.device_key();
            let identity = match identities.get(&device_key) {
                Some(identity) => identity.clone(),
                None => {
                    let identity = resolve_identity(&sample, topology)?;
                    identities.insert(device_key.clone(), identity.clone());
                    identity
                }
            };
            let records = index.lookup(&identity, &device_key);
            sample.alt_uuid = Some(identity);

            match records {
                Some(records) if !records.is_empty() => {
                    out.extend(records.iter().map(|record| attribute(&sample, record)));
                }
                _ => out.push(sample),
            }
        }

        enriched.push(out);
    }

    for ((_, sequence), out) in samples.iter_mut().zip(enriched) {
        *sequence = out;
    }
    Ok(())
}

fn resolve_identity(sample: &Sample, topology: &dyn TopologyProvider) -> Result<String> {
    if sample.is_partitioned() {
        find_partition_uuid(
            topology,
            &sample.device_index,
            &sample.partition_instance_id,
        )
    } else {
        Ok(sample.device_uuid.clone())
    }
}

fn attribute(sample: &Sample, record: &JobRecord) -> Sample {
    let mut copy = sample.clone();
    copy.attributes
        .insert(AppConfig::JOB_ATTRIBUTE.to_string(), record.job_id.clone());
    if let Some(user) = &record.user_id {
        copy.attributes
            .insert(AppConfig::USER_ATTRIBUTE.to_string(), user.clone());
    }
    copy
}
