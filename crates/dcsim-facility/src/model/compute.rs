//! Compute layer: accelerators, nodes, racks and the cluster.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Accelerator vendor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    Nvidia,
    Amd,
    Google,
    Intel,
}

/// Health status of an accelerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Failed,
    Maintenance,
}

/// Topology of the cluster network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkTopology {
    FatTree,
    RailOptimized,
    Dragonfly,
}

/// Accelerator model specification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcceleratorType {
    /// Model name.
    pub name: String,
    /// Vendor.
    pub vendor: Vendor,
    /// Thermal design power in W, i.e. power at full utilization.
    pub tdp_watts: f64,
    /// Power in W at zero utilization.
    pub idle_watts: f64,
    /// Memory capacity in GB.
    pub memory_gb: f64,
    /// Memory bandwidth in TB/s.
    pub memory_bandwidth_tb_s: f64,
    /// Dense FP16 performance in TFLOPS.
    pub fp16_tflops: f64,
    /// Dense FP8 performance in TFLOPS.
    pub fp8_tflops: f64,
    /// Interconnect name.
    pub interconnect_type: String,
    /// Interconnect bandwidth in GB/s.
    pub interconnect_bw_gb_s: f64,
}

/// Single accelerator (GPU) installed in a compute node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Accelerator {
    pub id: String,
    /// Model specification shared by all accelerators of the same type.
    pub spec: Arc<AcceleratorType>,
    pub node_id: String,
    /// Current utilization in 0.0-1.0 range.
    pub current_utilization: f64,
    pub current_temperature_c: f64,
    pub memory_used_gb: f64,
    pub health_status: HealthStatus,
    pub is_throttled: bool,
    /// Thermal throttle factor in (0, 1], 1 means no throttling.
    pub throttle_factor: f64,
}

/// Server hosting several accelerators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeNode {
    pub id: String,
    pub node_type: String,
    pub rack_id: String,
    pub rack_position_u: u32,
    pub accelerators: Vec<Accelerator>,
    pub cpu_count: u32,
    /// Fixed power of host CPUs in W.
    pub cpu_power_watts: f64,
    pub system_memory_gb: f64,
    /// Fixed power of NICs, fans, storage etc. in W.
    pub overhead_power_watts: f64,
}

/// Rack of compute nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    pub id: String,
    pub row: String,
    pub position: u32,
    pub nodes: Vec<ComputeNode>,
    pub max_power_kw: f64,
    pub pdu_a_id: String,
    pub pdu_b_id: String,
    pub cooling_zone_id: String,
    pub inlet_temp_c: f64,
    pub outlet_temp_c: f64,
}

/// Role of a network switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchRole {
    Tor,
    Leaf,
    Spine,
}

/// Network switch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkSwitch {
    pub id: String,
    pub role: SwitchRole,
    pub port_count: u32,
    pub port_speed_gbps: f64,
    pub power_watts: f64,
}

/// Compute cluster: racks plus the network fabric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub racks: Vec<Rack>,
    pub spine_switches: Vec<NetworkSwitch>,
    pub leaf_switches: Vec<NetworkSwitch>,
    pub network_topology: NetworkTopology,
}

impl Cluster {
    /// Iterates over all accelerators in rack, node, accelerator order.
    pub fn accelerators(&self) -> impl Iterator<Item = &Accelerator> {
        self.racks
            .iter()
            .flat_map(|rack| rack.nodes.iter())
            .flat_map(|node| node.accelerators.iter())
    }

    /// Mutable version of [`accelerators`](Self::accelerators) with the same traversal order.
    pub fn accelerators_mut(&mut self) -> impl Iterator<Item = &mut Accelerator> {
        self.racks
            .iter_mut()
            .flat_map(|rack| rack.nodes.iter_mut())
            .flat_map(|node| node.accelerators.iter_mut())
    }
}
