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

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gpu_job_exporter::common::config::{AppConfig, ExporterConfig};
use gpu_job_exporter::model::DeviceGroup;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one pass over a snapshot and print the metrics to stdout.
    Render(RenderArgs),
    /// Serve the metrics of a snapshot over HTTP, refreshing on an interval.
    Api(ApiArgs),
}

#[derive(Parser, Clone)]
pub struct PassArgs {
    /// JSON snapshot of the collected samples and device topology.
    #[arg(long)]
    pub snapshot: PathBuf,
    /// Directory of job mapping files, one file per device.
    #[arg(long)]
    pub job_dir: Option<PathBuf>,
    /// Label name for the device identity.
    #[arg(long, default_value = AppConfig::DEFAULT_UUID_LABEL)]
    pub uuid_label: String,
    /// Hostname label for samples that carry none.
    #[arg(long)]
    pub hostname: Option<String>,
}

impl PassArgs {
    pub fn exporter_config(&self) -> ExporterConfig {
        let mut config = ExporterConfig::new().uuid_label(self.uuid_label.clone());
        if let Some(dir) = &self.job_dir {
            config = config.job_mapping_dir(dir.clone());
        }
        if let Some(hostname) = &self.hostname {
            config = config.hostname(hostname.clone());
        }
        config
    }
}

#[derive(Parser, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub pass: PassArgs,
    /// Render only these device groups (gpu, switch, link, cpu, cpu_core).
    #[arg(long = "group")]
    pub groups: Vec<DeviceGroup>,
}

#[derive(Parser, Clone)]
pub struct ApiArgs {
    #[command(flatten)]
    pub pass: PassArgs,
    /// The port to listen on for the API server.
    #[arg(short, long, default_value_t = AppConfig::DEFAULT_PORT)]
    pub port: u16,
    /// The interval in seconds at which the snapshot is reloaded and rendered.
    #[arg(short, long, default_value_t = AppConfig::DEFAULT_REFRESH_INTERVAL_SECS)]
    pub interval: u64,
}
