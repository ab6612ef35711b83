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

mod api;
mod cli;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use api::run_api_mode;
use clap::Parser;
use cli::{Cli, Commands, RenderArgs};
use gpu_job_exporter::pipeline::Pipeline;
use gpu_job_exporter::snapshot::Snapshot;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpu_job_exporter=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_render(args: &RenderArgs) -> anyhow::Result<()> {
    let mut snapshot = Snapshot::load(&args.pass.snapshot)?;
    if !args.groups.is_empty() {
        let mut filtered = Snapshot::new(snapshot.topology.clone());
        for (group, samples) in snapshot.into_groups() {
            if args.groups.contains(&group) {
                *filtered.group_mut(group) = samples;
            }
        }
        snapshot = filtered;
    }

    let pipeline = Pipeline::new(args.pass.exporter_config());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline
        .run_pass(&snapshot, &mut out)
        .context("Metrics pass failed")?;
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Render(args) => match run_render(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
        Commands::Api(args) => {
            tokio::select! {
                result = run_api_mode(&args) => match result {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        tracing::error!("{e:#}");
                        eprintln!("Error: {e:#}");
                        ExitCode::FAILURE
                    }
                },
                _ = signal::ctrl_c() => {
                    tracing::info!("Shutting down");
                    ExitCode::SUCCESS
                }
            }
        }
    }
}
