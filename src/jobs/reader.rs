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

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::index::{JobIndex, JobRecord};
use crate::error::{Error, Result};

/// Build a [`JobIndex`] from a directory of job mapping files.
///
/// Every regular file directly inside `dir` is one entry: the file name is
/// the device key and each non-empty line is a job record. A missing
/// directory yields an empty index. Failing to list the directory or to
/// read one of its files fails the whole read.
///
/// Expected file contents:
///
/// ```text
/// 4242
/// 4243 1001
/// ```
pub fn read_job_directory(dir: &Path) -> Result<JobIndex> {
    let mut index = JobIndex::new();

    if let Err(e) = fs::metadata(dir) {
        warn!(
            "Unable to access job mapping directory '{}': {e}. Ignoring.",
            dir.display()
        );
        return Ok(index);
    }

    let entries = fs::read_dir(dir).map_err(|source| Error::JobDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Job mapping: can not read an entry of {}: {e}", dir.display());
                continue;
            }
        };
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(
                    "Job mapping: can not get file info for {:?}: {e}",
                    entry.file_name()
                );
                continue;
            }
        };
        if metadata.is_dir() {
            debug!("Job mapping: {:?} is a directory", entry.file_name());
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => warn!("Job mapping: skipping non UTF-8 file name {name:?}"),
        }
    }
    files.sort();

    debug!(
        "Job mapping: {} files found in {}",
        files.len(),
        dir.display()
    );

    for name in files {
        let records = read_job_file(&dir.join(&name))?;
        index.insert(name, records);
    }

    Ok(index)
}

/// Read the job records of one mapping file, skipping blank lines and
/// dropping lines that are not UTF-8 or have more than two tokens.
///
/// Only failing to read the file is an error; its content never is.
pub fn read_job_file(path: &Path) -> Result<Vec<JobRecord>> {
    let content = fs::read(path).map_err(|source| Error::JobDirectory {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (lineno, raw) in content.split(|&b| b == b'\n').enumerate() {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                warn!(
                    "Invalid job line at {}:{}, not UTF-8: {e}",
                    path.display(),
                    lineno + 1
                );
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match JobRecord::parse(line) {
            Some(record) => records.push(record),
            None => warn!(
                "Invalid job line {:?} at {}:{}, expected \"<job> [<user>]\"",
                line,
                path.display(),
                lineno + 1
            ),
        }
    }
    Ok(records)
}
