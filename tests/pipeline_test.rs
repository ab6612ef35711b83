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

//! End-to-end tests of the enrichment and rendering pass.

use std::fs;
use std::sync::Arc;

use gpu_job_exporter::prelude::*;
use tempfile::TempDir;

fn gauge(name: &str, help: &str) -> Arc<CounterDefinition> {
    Arc::new(CounterDefinition::new(1, name, MetricKind::Gauge, help))
}

fn render(group: DeviceGroup, set: &SampleSet) -> String {
    let mut out = Vec::new();
    render_group(&mut out, group, set).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_single_gpu_sample_golden() {
    let mut set = SampleSet::new();
    set.insert(gauge("X", "Some help"), vec![Sample::new("0", "GPU-abc", "139")]);

    assert_eq!(
        render(DeviceGroup::Gpu, &set),
        "# HELP X Some help\n\
         # TYPE X gauge\n\
         X{gpu=\"0\",UUID=\"GPU-abc\",pci_bus_id=\"\",device=\"\",modelName=\"\"} 139\n"
    );
}

#[test]
fn test_job_fan_out_golden() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0"), "100 200\n300\n").unwrap();

    let counter = Arc::new(
        CounterDefinition::new(252, "DCGM_FI_DEV_FB_USED", MetricKind::Gauge, "FB used (MiB).")
            .with_alternate(
                "nvidia_gpu_memory_used_bytes",
                "Memory used by the GPU device in bytes",
                1_048_576,
            ),
    );
    let mut sample = Sample::new("0", "GPU-abc", "2");
    sample.device_name = "nvidia0".to_string();
    sample.model_name = "NVIDIA A100-SXM4-40GB".to_string();
    sample.pci_bus_id = "00000000:07:00.0".to_string();
    sample.hostname = "node-1".to_string();

    let mut snapshot = Snapshot::new(DeviceTopology::with_devices(1));
    snapshot
        .group_mut(DeviceGroup::Gpu)
        .insert(counter, vec![sample]);

    let pipeline = Pipeline::new(ExporterConfig::new().job_mapping_dir(tmp.path()));
    let mut out = Vec::new();
    pipeline.run_pass(&snapshot, &mut out).unwrap();

    let expected = "\
# HELP DCGM_FI_DEV_FB_USED FB used (MiB).
# TYPE DCGM_FI_DEV_FB_USED gauge
DCGM_FI_DEV_FB_USED{gpu=\"0\",UUID=\"GPU-abc\",pci_bus_id=\"00000000:07:00.0\",device=\"nvidia0\",modelName=\"NVIDIA A100-SXM4-40GB\",Hostname=\"node-1\",hpc_job=\"100\",hpc_user=\"200\"} 2
DCGM_FI_DEV_FB_USED{gpu=\"0\",UUID=\"GPU-abc\",pci_bus_id=\"00000000:07:00.0\",device=\"nvidia0\",modelName=\"NVIDIA A100-SXM4-40GB\",Hostname=\"node-1\",hpc_job=\"300\"} 2
# HELP nvidia_gpu_memory_used_bytes Memory used by the GPU device in bytes
# TYPE nvidia_gpu_memory_used_bytes gauge
nvidia_gpu_memory_used_bytes{minor_number=\"0\",uuid=\"GPU-abc\",device=\"nvidia0\",modelName=\"NVIDIA A100-SXM4-40GB\",Hostname=\"node-1\",hpc_job=\"100\",hpc_user=\"200\"} 2097152
nvidia_gpu_memory_used_bytes{minor_number=\"0\",uuid=\"GPU-abc\",device=\"nvidia0\",modelName=\"NVIDIA A100-SXM4-40GB\",Hostname=\"node-1\",hpc_job=\"300\"} 2097152
# HELP nvidia_gpu_jobId JobId number of a job currently using this GPU as reported by Slurm
# TYPE nvidia_gpu_jobId gauge
nvidia_gpu_jobId{minor_number=\"0\",uuid=\"GPU-abc\",device=\"nvidia0\",modelName=\"NVIDIA A100-SXM4-40GB\",GPU_I_PROFILE=\"\",GPU_I_ID=\"\",jobid=\"100\",userid=\"200\"} 100
nvidia_gpu_jobId{minor_number=\"0\",uuid=\"GPU-abc\",device=\"nvidia0\",modelName=\"NVIDIA A100-SXM4-40GB\",GPU_I_PROFILE=\"\",GPU_I_ID=\"\",jobid=\"300\"} 300
# HELP nvidia_gpu_jobUid Uid number of user running jobs on this GPU
# TYPE nvidia_gpu_jobUid gauge
nvidia_gpu_jobUid{minor_number=\"0\",uuid=\"GPU-abc\",device=\"nvidia0\",modelName=\"NVIDIA A100-SXM4-40GB\",GPU_I_PROFILE=\"\",GPU_I_ID=\"\",jobid=\"100\",userid=\"200\"} 200
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_partition_sample_uses_partition_uuid() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("MIG-5678"), "77\n").unwrap();

    let topology = DeviceTopology::new(vec![
        DeviceTopologyEntry::default(),
        DeviceTopologyEntry {
            partitions: vec![PartitionInfo {
                instance_id: 2,
                uuid: "MIG-5678".to_string(),
            }],
        },
    ]);

    let mut sample = Sample::new("1", "GPU-parent", "0.75");
    sample.partition_profile = "3g.20gb".to_string();
    sample.partition_instance_id = "2".to_string();

    let mut snapshot = Snapshot::new(topology);
    snapshot
        .group_mut(DeviceGroup::Gpu)
        .insert(gauge("UTIL", "Ratio"), vec![sample]);

    let pipeline = Pipeline::new(ExporterConfig::new().job_mapping_dir(tmp.path()));
    let out = pipeline.render_pass(&snapshot).unwrap();

    assert!(out.contains(
        "UTIL{gpu=\"1\",UUID=\"MIG-5678\",pci_bus_id=\"\",device=\"\",modelName=\"\",GPU_I_PROFILE=\"3g.20gb\",GPU_I_ID=\"2\",hpc_job=\"77\"} 0.75\n"
    ));
    assert!(out.contains(
        "nvidia_gpu_jobId{minor_number=\"1\",uuid=\"MIG-5678\",device=\"\",modelName=\"\",GPU_I_PROFILE=\"3g.20gb\",GPU_I_ID=\"2\",jobid=\"77\"} 77\n"
    ));
    assert!(!out.contains("nvidia_gpu_jobUid"));
}

#[test]
fn test_non_utf8_job_file_keeps_other_devices_attributed() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0"), "100 200\n").unwrap();
    fs::write(tmp.path().join("1"), b"300 caf\xe9\n").unwrap();

    let mut snapshot = Snapshot::new(DeviceTopology::with_devices(2));
    snapshot.group_mut(DeviceGroup::Gpu).insert(
        gauge("X", "help"),
        vec![Sample::new("0", "GPU-a", "1"), Sample::new("1", "GPU-b", "1")],
    );

    let pipeline = Pipeline::new(ExporterConfig::new().job_mapping_dir(tmp.path()));
    let out = pipeline.render_pass(&snapshot).unwrap();

    assert!(out.contains(
        "X{gpu=\"0\",UUID=\"GPU-a\",pci_bus_id=\"\",device=\"\",modelName=\"\",hpc_job=\"100\",hpc_user=\"200\"} 1\n"
    ));
    assert!(out.contains(
        "X{gpu=\"1\",UUID=\"GPU-b\",pci_bus_id=\"\",device=\"\",modelName=\"\"} 1\n"
    ));
}

#[test]
fn test_unknown_partition_is_not_exposed_as_parent_gpu() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0.9"), "5\n").unwrap();

    let mut sample = Sample::new("0", "GPU-parent", "1");
    sample.partition_profile = "1g.10gb".to_string();
    sample.partition_instance_id = "9".to_string();

    let mut snapshot = Snapshot::new(DeviceTopology::with_devices(1));
    snapshot
        .group_mut(DeviceGroup::Gpu)
        .insert(gauge("X", "help"), vec![sample]);

    let pipeline = Pipeline::new(ExporterConfig::new().job_mapping_dir(tmp.path()));
    let out = pipeline.render_pass(&snapshot).unwrap();

    assert!(out.contains(
        "X{gpu=\"0\",UUID=\"\",pci_bus_id=\"\",device=\"\",modelName=\"\",GPU_I_PROFILE=\"1g.10gb\",GPU_I_ID=\"9\",hpc_job=\"5\"} 1\n"
    ));
    assert!(out.contains(
        "nvidia_gpu_jobId{minor_number=\"0\",uuid=\"\",device=\"\",modelName=\"\",GPU_I_PROFILE=\"1g.10gb\",GPU_I_ID=\"9\",jobid=\"5\"} 5\n"
    ));
    assert!(!out.contains("GPU-parent"));
}

#[test]
fn test_missing_directory_matches_empty_directory() {
    let tmp = TempDir::new().unwrap();
    let empty = tmp.path().join("empty");
    fs::create_dir(&empty).unwrap();

    let mut snapshot = Snapshot::new(DeviceTopology::with_devices(2));
    snapshot.group_mut(DeviceGroup::Gpu).insert(
        gauge("X", "h"),
        vec![Sample::new("0", "GPU-a", "1"), Sample::new("1", "GPU-b", "2")],
    );

    let missing = Pipeline::new(ExporterConfig::new().job_mapping_dir(tmp.path().join("absent")))
        .render_pass(&snapshot)
        .unwrap();
    let no_jobs = Pipeline::new(ExporterConfig::new().job_mapping_dir(&empty))
        .render_pass(&snapshot)
        .unwrap();

    assert_eq!(missing, no_jobs);
    assert_eq!(missing.matches("X{").count(), 2);
}

#[test]
fn test_out_of_range_partition_aborts_pass() {
    let mut sample = Sample::new("4", "GPU-x", "1");
    sample.partition_profile = "1g.5gb".to_string();
    sample.partition_instance_id = "1".to_string();

    let mut snapshot = Snapshot::new(DeviceTopology::with_devices(1));
    snapshot
        .group_mut(DeviceGroup::Gpu)
        .insert(gauge("X", "h"), vec![sample]);

    let tmp = TempDir::new().unwrap();
    let pipeline = Pipeline::new(ExporterConfig::new().job_mapping_dir(tmp.path()));
    let err = pipeline.render_pass(&snapshot).unwrap_err();
    assert!(matches!(
        err,
        Error::DeviceIndexOutOfRange { index: 4, count: 1 }
    ));
}

#[test]
fn test_every_group_renders_in_order() {
    let snapshot = Snapshot::from_json(
        r#"{
            "groups": [
                {"group": "cpu_core", "counters": [{"counter": {"field_id": 1, "name": "CORE"},
                    "samples": [{"device_index": "5", "device_name": "0", "value": "1"}]}]},
                {"group": "link", "counters": [{"counter": {"field_id": 2, "name": "LINK"},
                    "samples": [{"device_index": "3", "device_name": "1", "value": "2"}]}]},
                {"group": "switch", "counters": [{"counter": {"field_id": 3, "name": "SW", "kind": "counter"},
                    "samples": [{"device_index": "1", "value": "3"}]}]},
                {"group": "cpu", "counters": [{"counter": {"field_id": 4, "name": "CPU"},
                    "samples": [{"device_index": "0", "value": "4", "hostname": "h1"}]}]}
            ]
        }"#,
    )
    .unwrap();

    let out = Pipeline::new(ExporterConfig::default())
        .render_pass(&snapshot)
        .unwrap();
    assert_eq!(
        out,
        "# HELP SW \n# TYPE SW counter\nSW{nvswitch=\"1\"} 3\n\
         # HELP LINK \n# TYPE LINK gauge\nLINK{nvlink=\"3\",nvswitch=\"1\"} 2\n\
         # HELP CPU \n# TYPE CPU gauge\nCPU{cpu=\"0\",Hostname=\"h1\"} 4\n\
         # HELP CORE \n# TYPE CORE gauge\nCORE{cpucore=\"5\",cpu=\"0\"} 1\n"
    );
}

#[test]
fn test_label_values_are_escaped() {
    let mut sample = Sample::new("0", "GPU-a", "1");
    sample.model_name = "Model \"X\"".to_string();
    let mut set = SampleSet::new();
    set.insert(gauge("X", "multi\nline"), vec![sample]);

    let out = render(DeviceGroup::Gpu, &set);
    assert!(out.starts_with("# HELP X multi\\nline\n"));
    assert!(out.contains("modelName=\"Model \\\"X\\\"\""));
}
