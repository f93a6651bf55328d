//! Accelerator specifications.

use crate::model::compute::{AcceleratorType, Vendor};

/// Keys of known accelerator types.
pub const ACCELERATOR_KEYS: [&str; 4] = ["H100_SXM", "H200_SXM", "B200", "MI300X"];

#[allow(clippy::too_many_arguments)]
fn spec(
    name: &str,
    vendor: Vendor,
    tdp_watts: f64,
    idle_watts: f64,
    memory_gb: f64,
    memory_bandwidth_tb_s: f64,
    fp16_tflops: f64,
    fp8_tflops: f64,
    interconnect_type: &str,
    interconnect_bw_gb_s: f64,
) -> AcceleratorType {
    AcceleratorType {
        name: name.to_string(),
        vendor,
        tdp_watts,
        idle_watts,
        memory_gb,
        memory_bandwidth_tb_s,
        fp16_tflops,
        fp8_tflops,
        interconnect_type: interconnect_type.to_string(),
        interconnect_bw_gb_s,
    }
}

/// Returns specification of the accelerator type with the given key.
pub fn accelerator_type(key: &str) -> Option<AcceleratorType> {
    let spec = match key {
        "H100_SXM" => spec("H100 SXM", Vendor::Nvidia, 700., 105., 80., 3.35, 1979., 3958., "NVLink 4", 900.),
        "H200_SXM" => spec("H200 SXM", Vendor::Nvidia, 700., 105., 141., 4.8, 1979., 3958., "NVLink 4", 900.),
        "B200" => spec("B200", Vendor::Nvidia, 1000., 150., 192., 8.0, 4500., 9000., "NVLink 5", 1800.),
        "MI300X" => spec("MI300X", Vendor::Amd, 750., 120., 192., 5.3, 1307., 2614., "Infinity Fabric", 896.),
        _ => return None,
    };
    Some(spec)
}
