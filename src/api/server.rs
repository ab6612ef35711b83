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

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{routing::get, Router};
use gpu_job_exporter::pipeline::Pipeline;
use gpu_job_exporter::snapshot::Snapshot;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{metrics_handler, SharedState};
use crate::cli::ApiArgs;

/// Reload the snapshot and run one pass, keeping the previous output when
/// the pass fails.
async fn refresh(state: &SharedState, pipeline: &Pipeline, args: &ApiArgs) {
    let snapshot = match Snapshot::load(&args.pass.snapshot) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load snapshot: {e:#}");
            return;
        }
    };

    match pipeline.render_pass(&snapshot) {
        Ok(metrics) => {
            state.write().await.metrics = metrics;
        }
        Err(e) => {
            tracing::error!("Metrics pass aborted, serving the previous output: {e}");
        }
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server, re-rendering the snapshot every `interval` seconds.
///
/// Returns when the listener can not be bound or the server fails.
pub async fn run_api_mode(args: &ApiArgs) -> anyhow::Result<()> {
    let state = SharedState::default();
    let pipeline = Arc::new(Pipeline::new(args.pass.exporter_config()));

    let state_clone = state.clone();
    let task_args = args.clone();
    tokio::spawn(async move {
        let interval = Duration::from_secs(task_args.interval.max(1));
        loop {
            refresh(&state_clone, &pipeline, &task_args).await;
            tokio::time::sleep(interval).await;
        }
    });

    let port = args.port;
    let listener = TcpListener::bind(&format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("Failed to bind TCP listener on port {port}"))?;
    match listener.local_addr() {
        Ok(addr) => tracing::info!("API server listening on {addr}"),
        Err(_) => tracing::info!("API server listening on port {port}"),
    }
    axum::serve(listener, router(state))
        .await
        .context("TCP server error")
}
