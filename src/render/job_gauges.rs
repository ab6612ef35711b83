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

//! Job id and job owner gauges kept for dashboards built against the
//! older per-GPU Slurm exporter.

use std::collections::HashSet;

use super::builder::MetricBuilder;
use crate::common::config::AppConfig;
use crate::model::{Sample, SampleSet};

/// One emitted job gauge line: the device as exposed plus the job and user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct JobLine<'a> {
    device_index: &'a str,
    identity: &'a str,
    device_name: &'a str,
    model_name: &'a str,
    partition_profile: &'a str,
    partition_instance_id: &'a str,
    job: &'a str,
    user: Option<&'a str>,
}

impl<'a> JobLine<'a> {
    fn from_sample(sample: &'a Sample) -> Option<Self> {
        let job = sample
            .attributes
            .get(AppConfig::JOB_ATTRIBUTE)
            .map(String::as_str)
            .filter(|job| !job.is_empty())?;
        let user = sample
            .attributes
            .get(AppConfig::USER_ATTRIBUTE)
            .map(String::as_str)
            .filter(|user| !user.is_empty());

        Some(Self {
            device_index: &sample.device_index,
            identity: sample.identity(),
            device_name: &sample.device_name,
            model_name: &sample.model_name,
            partition_profile: &sample.partition_profile,
            partition_instance_id: &sample.partition_instance_id,
            job,
            user,
        })
    }

    fn labels(&self) -> Vec<(&'a str, &'a str)> {
        let mut labels = vec![
            ("minor_number", self.device_index),
            ("uuid", self.identity),
            ("device", self.device_name),
            ("modelName", self.model_name),
            ("GPU_I_PROFILE", self.partition_profile),
            ("GPU_I_ID", self.partition_instance_id),
            ("jobid", self.job),
        ];
        if let Some(user) = self.user {
            labels.push(("userid", user));
        }
        labels
    }
}

/// Append the job id and job owner gauges for every distinct
/// (device, job, user) combination found in `samples`.
///
/// Nothing is written when no sample carries a job attribute. The owner
/// gauge is written only for combinations that name a user.
pub fn export_job_gauges(builder: &mut MetricBuilder, samples: &SampleSet) {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for line in samples.samples().filter_map(JobLine::from_sample) {
        if seen.insert(line) {
            lines.push(line);
        }
    }

    if lines.is_empty() {
        return;
    }

    builder
        .help(AppConfig::JOB_ID_GAUGE, AppConfig::JOB_ID_HELP)
        .type_(AppConfig::JOB_ID_GAUGE, "gauge");
    for line in &lines {
        builder.metric(AppConfig::JOB_ID_GAUGE, &line.labels(), line.job);
    }

    if lines.iter().all(|line| line.user.is_none()) {
        return;
    }

    builder
        .help(AppConfig::JOB_UID_GAUGE, AppConfig::JOB_UID_HELP)
        .type_(AppConfig::JOB_UID_GAUGE, "gauge");
    for line in &lines {
        if let Some(user) = line.user {
            builder.metric(AppConfig::JOB_UID_GAUGE, &line.labels(), user);
        }
    }
}
