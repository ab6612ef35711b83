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

use std::collections::HashMap;
use std::fmt;

/// One line of a job mapping file: a job id, optionally followed by the
/// id of the user running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub job_id: String,
    pub user_id: Option<String>,
}

impl JobRecord {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            user_id: None,
        }
    }

    pub fn with_user(job_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            user_id: Some(user_id.into()),
        }
    }

    /// Parse `"<job>"` or `"<job> <user>"`. Lines with no token or with more
    /// than two whitespace-separated tokens yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(job), None, None) => Some(Self::new(job)),
            (Some(job), Some(user), None) => Some(Self::with_user(job, user)),
            _ => None,
        }
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user_id {
            Some(user) => write!(f, "{} {user}", self.job_id),
            None => f.write_str(&self.job_id),
        }
    }
}

/// Jobs running on each device, keyed by device UUID (`GPU-...`,
/// `MIG-...`) or by device key (`"2"`, `"2.11"`).
#[derive(Debug, Clone, Default)]
pub struct JobIndex {
    jobs: HashMap<String, Vec<JobRecord>>,
}

impl JobIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `records` to the entry for `key`, creating it even when
    /// `records` is empty.
    pub fn insert(&mut self, key: impl Into<String>, records: Vec<JobRecord>) {
        self.jobs.entry(key.into()).or_default().extend(records);
    }

    pub fn get(&self, key: &str) -> Option<&[JobRecord]> {
        self.jobs.get(key).map(Vec::as_slice)
    }

    /// Records for a device: the entry under its resolved UUID when one
    /// exists, the entry under its device key otherwise.
    pub fn lookup(&self, uuid: &str, device_key: &str) -> Option<&[JobRecord]> {
        self.get(uuid).or_else(|| self.get(device_key))
    }

    /// Number of device entries.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
