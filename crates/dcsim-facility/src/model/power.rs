//! Power layer: sources, transformers, UPS units and PDUs grouped into redundant power paths.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use dcsim_models::curve::Curve;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Grid,
    Solar,
    Wind,
    Generator,
    Battery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsMode {
    Online,
    Bypass,
    Battery,
    Eco,
}

/// Redundancy of the power distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedundancyMode {
    #[serde(rename = "n")]
    N,
    #[serde(rename = "n_plus_1")]
    NPlus1,
    #[serde(rename = "2n")]
    TwoN,
    #[serde(rename = "2n_plus_1")]
    TwoNPlus1,
}

/// Power source feeding a power path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerSource {
    pub id: String,
    pub source_type: SourceType,
    pub capacity_kw: f64,
    pub availability: f64,
    pub current_output_kw: f64,
    pub is_online: bool,
    pub cost_per_kwh: f64,
    pub carbon_intensity_g_per_kwh: f64,
    // generator
    pub startup_time_seconds: Option<f64>,
    pub fuel_consumption_l_per_kwh: Option<f64>,
    pub fuel_tank_liters: Option<f64>,
    pub fuel_level_pct: Option<f64>,
    // solar and wind
    pub capacity_factor: Option<f64>,
    // battery
    pub state_of_charge: Option<f64>,
    pub max_discharge_rate_kw: Option<f64>,
    pub round_trip_efficiency: Option<f64>,
}

impl PowerSource {
    /// Creates an online grid source without generator, renewable or battery properties.
    pub fn grid(id: &str, capacity_kw: f64, output_kw: f64, cost_per_kwh: f64, carbon_intensity: f64) -> Self {
        Self {
            id: id.to_string(),
            source_type: SourceType::Grid,
            capacity_kw,
            availability: 0.9999,
            current_output_kw: output_kw,
            is_online: true,
            cost_per_kwh,
            carbon_intensity_g_per_kwh: carbon_intensity,
            startup_time_seconds: None,
            fuel_consumption_l_per_kwh: None,
            fuel_tank_liters: None,
            fuel_level_pct: None,
            capacity_factor: None,
            state_of_charge: None,
            max_discharge_rate_kw: None,
            round_trip_efficiency: None,
        }
    }
}

/// Step-down transformer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    pub id: String,
    pub capacity_kva: f64,
    pub voltage_primary: f64,
    pub voltage_secondary: f64,
    pub current_load_kw: f64,
    /// Core loss in kW, present at any load.
    pub no_load_loss_kw: f64,
    /// Winding loss in kW at full load, scales with the square of the load fraction.
    pub full_load_loss_kw: f64,
}

/// Uninterruptible power supply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ups {
    pub id: String,
    pub capacity_kva: f64,
    pub current_load_kw: f64,
    pub mode: UpsMode,
    pub redundancy_group: String,
    pub is_healthy: bool,
    pub battery_runtime_minutes: f64,
    pub battery_health_pct: f64,
    /// Efficiency as a function of the load fraction.
    pub efficiency_curve: Curve,
}

/// Power distribution unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pdu {
    pub id: String,
    pub capacity_kw: f64,
    pub voltage_in: f64,
    pub voltage_out: f64,
    pub current_load_kw: f64,
    pub efficiency: f64,
    pub redundancy_group: String,
}

/// Independent feed from the sources to the racks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerPath {
    pub id: String,
    pub sources: Vec<PowerSource>,
    pub transformers: Vec<Transformer>,
    pub ups_units: Vec<Ups>,
    pub pdus: Vec<Pdu>,
}

/// Power distribution system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerSystem {
    /// Redundant power paths by path name, iterated in insertion order.
    pub paths: IndexMap<String, PowerPath>,
    pub redundancy_mode: RedundancyMode,
}
