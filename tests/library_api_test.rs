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

//! Integration tests for the gpu-job-exporter library API.

use std::fs;
use std::sync::Arc;

use gpu_job_exporter::prelude::*;
use tempfile::TempDir;

#[test]
fn test_scaling_preserves_numeric_type() {
    for (value, multiplier, expected) in [
        ("139", 1, "139"),
        ("12.5", 1, "12.5"),
        ("3", 1024, "3072"),
        ("-7", 3, "-21"),
        ("2.5", 2, "5.000000"),
        ("0.001", 1000, "1.000000"),
    ] {
        assert_eq!(scale_value(value, multiplier), expected, "{value} * {multiplier}");
    }
}

#[test]
fn test_enrich_with_job_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("GPU-b"), "1 10\n2 20\n3\n").unwrap();
    fs::write(tmp.path().join("0"), "4 5 6\n").unwrap();

    let index = read_job_directory(tmp.path()).unwrap();
    assert_eq!(index.get("GPU-b").map(<[_]>::len), Some(3));
    assert_eq!(index.get("0").map(<[_]>::len), Some(0));

    let counter = Arc::new(CounterDefinition::new(1, "X", MetricKind::Gauge, "h"));
    let mut set = SampleSet::new();
    set.insert(
        Arc::clone(&counter),
        vec![Sample::new("0", "GPU-a", "1"), Sample::new("1", "GPU-b", "2")],
    );

    enrich(&mut set, &index, &DeviceTopology::with_devices(2)).unwrap();

    let out = set.get(&counter).unwrap();
    // GPU-a has an empty entry and passes through, GPU-b fans out three ways.
    assert_eq!(out.len(), 4);
    assert!(out[0].attributes.is_empty());
    let jobs: Vec<(&str, Option<&str>)> = out[1..]
        .iter()
        .map(|s| {
            (
                s.attributes[AppConfig::JOB_ATTRIBUTE].as_str(),
                s.attributes.get(AppConfig::USER_ATTRIBUTE).map(String::as_str),
            )
        })
        .collect();
    assert_eq!(
        jobs,
        vec![("1", Some("10")), ("2", Some("20")), ("3", None)]
    );
}

#[test]
fn test_snapshot_file_renders() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{
            "topology": {"devices": [{}]},
            "groups": [{"group": "gpu", "counters": [{
                "counter": {"field_id": 203, "name": "DCGM_FI_DEV_GPU_UTIL", "help": "GPU utilization (in %)."},
                "samples": [{"device_index": "0", "device_uuid": "GPU-abc", "value": "139"}]
            }]}]
        }"#,
    )
    .unwrap();

    let snapshot = Snapshot::load(&path).unwrap();
    let pipeline = Pipeline::new(ExporterConfig::new().uuid_label("uuid"));

    let mut out = Vec::new();
    pipeline.run_pass(&snapshot, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "# HELP DCGM_FI_DEV_GPU_UTIL GPU utilization (in %).\n\
         # TYPE DCGM_FI_DEV_GPU_UTIL gauge\n\
         DCGM_FI_DEV_GPU_UTIL{gpu=\"0\",uuid=\"GPU-abc\",pci_bus_id=\"\",device=\"\",modelName=\"\"} 139\n"
    );
}

#[test]
fn test_custom_transform_runs_after_job_mapper() {
    struct AddCluster;

    impl Transform for AddCluster {
        fn name(&self) -> &'static str {
            "add_cluster"
        }

        fn process(
            &self,
            samples: &mut SampleSet,
            _topology: &dyn TopologyProvider,
        ) -> gpu_job_exporter::Result<()> {
            for (_, sequence) in samples.iter_mut() {
                for sample in sequence.iter_mut() {
                    sample
                        .labels
                        .insert("cluster".to_string(), "alpha".to_string());
                }
            }
            Ok(())
        }
    }

    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0"), "9\n").unwrap();
    let pipeline =
        Pipeline::new(ExporterConfig::new().job_mapping_dir(tmp.path())).with_transform(AddCluster);
    assert_eq!(pipeline.transform_names(), vec!["job_mapper", "add_cluster"]);

    let mut snapshot = Snapshot::new(DeviceTopology::with_devices(1));
    snapshot.group_mut(DeviceGroup::Gpu).insert(
        Arc::new(CounterDefinition::new(1, "X", MetricKind::Gauge, "h")),
        vec![Sample::new("0", "GPU-a", "1")],
    );

    let out = pipeline.render_pass(&snapshot).unwrap();
    assert!(out.contains(",cluster=\"alpha\",hpc_job=\"9\"} 1\n"));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
    assert_send_sync::<Pipeline>();
}
