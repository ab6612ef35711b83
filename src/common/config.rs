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

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{DeviceGroup, SampleSet};

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Server
    pub const DEFAULT_PORT: u16 = 9400;
    pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

    // Enrichment attributes
    pub const JOB_ATTRIBUTE: &'static str = "hpc_job";
    pub const USER_ATTRIBUTE: &'static str = "hpc_user";

    // Compatibility gauges
    pub const JOB_ID_GAUGE: &'static str = "nvidia_gpu_jobId";
    pub const JOB_ID_HELP: &'static str =
        "JobId number of a job currently using this GPU as reported by Slurm";
    pub const JOB_UID_GAUGE: &'static str = "nvidia_gpu_jobUid";
    pub const JOB_UID_HELP: &'static str = "Uid number of user running jobs on this GPU";

    // Labels
    pub const DEFAULT_UUID_LABEL: &'static str = "UUID";
}

/// Runtime configuration of the exporter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Directory of job mapping files. Job attribution is disabled when unset.
    pub job_mapping_dir: Option<PathBuf>,
    /// Label name for the device identity, applied to samples that leave
    /// theirs empty.
    pub uuid_label: String,
    /// Hostname label applied to samples that carry none.
    pub hostname: Option<String>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            job_mapping_dir: None,
            uuid_label: AppConfig::DEFAULT_UUID_LABEL.to_string(),
            hostname: None,
        }
    }
}

impl ExporterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_mapping_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.job_mapping_dir = Some(dir.into());
        self
    }

    pub fn uuid_label(mut self, label: impl Into<String>) -> Self {
        self.uuid_label = label.into();
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn job_dir(&self) -> Option<&Path> {
        self.job_mapping_dir.as_deref()
    }

    /// Fill sample fields the collection layer left empty.
    pub fn apply_defaults(&self, groups: &mut [(DeviceGroup, SampleSet)]) {
        for (_, set) in groups.iter_mut() {
            for (_, samples) in set.iter_mut() {
                for sample in samples.iter_mut() {
                    if sample.uuid_label.is_empty() {
                        sample.uuid_label = self.uuid_label.clone();
                    }
                    if sample.hostname.is_empty() {
                        if let Some(hostname) = &self.hostname {
                            sample.hostname = hostname.clone();
                        }
                    }
                }
            }
        }
    }
}
