//! Compute layer: accelerator, node, rack and cluster power.

use dcsim_models::power::accelerator::{AcceleratorPowerModel, PolynomialAcceleratorPowerModel};

use crate::model::compute::{Accelerator, Cluster, ComputeNode, HealthStatus, Rack};

/// Accelerators at or above this utilization can't take more work.
pub const AVAILABLE_UTILIZATION_LIMIT: f64 = 0.95;

/// Returns accelerator power in W, the throttle factor scales the effective utilization.
pub fn accelerator_power(accelerator: &Accelerator) -> f64 {
    let model =
        PolynomialAcceleratorPowerModel::with_default_exponent(accelerator.spec.idle_watts, accelerator.spec.tdp_watts);
    model.get_power(accelerator.current_utilization * accelerator.throttle_factor)
}

/// Returns node power in W.
pub fn node_power(node: &ComputeNode) -> f64 {
    node.accelerators.iter().map(accelerator_power).sum::<f64>() + node.cpu_power_watts + node.overhead_power_watts
}

/// Returns rack power in kW.
pub fn rack_power(rack: &Rack) -> f64 {
    rack.nodes.iter().map(node_power).sum::<f64>() / 1000.
}

/// Returns IT power of the cluster in kW including the network switches.
pub fn cluster_power(cluster: &Cluster) -> f64 {
    let racks = cluster.racks.iter().map(rack_power).sum::<f64>();
    let switches = cluster
        .spine_switches
        .iter()
        .chain(cluster.leaf_switches.iter())
        .map(|switch| switch.power_watts)
        .sum::<f64>();
    racks + switches / 1000.
}

pub fn total_accelerators(cluster: &Cluster) -> usize {
    cluster.accelerators().count()
}

/// Returns the number of healthy accelerators with spare capacity.
pub fn available_accelerators(cluster: &Cluster) -> usize {
    cluster
        .accelerators()
        .filter(|acc| acc.health_status == HealthStatus::Healthy && acc.current_utilization < AVAILABLE_UTILIZATION_LIMIT)
        .count()
}

pub fn failed_accelerators(cluster: &Cluster) -> usize {
    cluster
        .accelerators()
        .filter(|acc| acc.health_status == HealthStatus::Failed)
        .count()
}

/// Returns average utilization over all accelerators, 0 for an empty cluster.
pub fn average_utilization(cluster: &Cluster) -> f64 {
    let count = total_accelerators(cluster);
    if count == 0 {
        return 0.;
    }
    cluster.accelerators().map(|acc| acc.current_utilization).sum::<f64>() / count as f64
}
