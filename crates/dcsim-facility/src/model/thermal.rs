//! Thermal layer: chillers, cooling towers, air handlers, CDUs and thermal zones.

use serde::{Deserialize, Serialize};

use dcsim_models::curve::Curve;

/// Heat rejection technology used at the racks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolingType {
    AirCrac,
    AirInrow,
    Rdhx,
    /// Direct-to-chip liquid cooling.
    D2c,
    ImmersionSinglePhase,
    ImmersionTwoPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChillerType {
    AirCooled,
    WaterCooled,
    Absorption,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChillerStatus {
    Running,
    Standby,
    Failed,
    Maintenance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerType {
    Wet,
    Dry,
    Hybrid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    DataHall,
    HotAisle,
    ColdAisle,
}

/// Mechanical chiller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chiller {
    pub id: String,
    pub chiller_type: ChillerType,
    pub capacity_kw: f64,
    /// Fraction of the assigned heat load handled by this chiller.
    pub current_load_pct: f64,
    pub status: ChillerStatus,
    pub chw_supply_temp_c: f64,
    pub chw_return_temp_c: f64,
    /// COP as a function of the ambient temperature.
    pub cop_curve: Curve,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoolingTower {
    pub id: String,
    pub tower_type: TowerType,
    pub capacity_kw: f64,
    pub fan_power_kw: f64,
    pub pump_power_kw: f64,
    pub water_consumption_l_per_kwh: f64,
    pub approach_temp_c: f64,
    pub range_temp_c: f64,
}

/// Coolant distribution unit of a liquid cooling loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cdu {
    pub id: String,
    pub cooling_capacity_kw: f64,
    pub facility_supply_temp_c: f64,
    pub facility_return_temp_c: f64,
    pub server_supply_temp_c: f64,
    pub server_return_temp_c: f64,
    pub facility_flow_lpm: f64,
    pub server_flow_lpm: f64,
    pub connected_racks: Vec<String>,
}

/// Computer room air handler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crah {
    pub id: String,
    pub cooling_capacity_kw: f64,
    pub airflow_cfm: f64,
    pub supply_air_temp_c: f64,
    pub return_air_temp_c: f64,
    pub fan_power_kw: f64,
    pub current_load_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermalZone {
    pub id: String,
    pub zone_type: ZoneType,
    pub current_temp_c: f64,
    pub humidity_pct: f64,
    pub target_temp_c: f64,
    pub temp_high_alarm_c: f64,
    pub temp_critical_c: f64,
    pub rack_ids: Vec<String>,
    pub cooling_unit_ids: Vec<String>,
    pub volume_m3: f64,
}

/// Outdoor weather conditions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub dry_bulb_temp_c: f64,
    pub wet_bulb_temp_c: f64,
    pub humidity_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoolingSystem {
    pub cooling_type: CoolingType,
    pub chillers: Vec<Chiller>,
    pub cooling_towers: Vec<CoolingTower>,
    pub crah_units: Vec<Crah>,
    pub cdus: Vec<Cdu>,
    pub zones: Vec<ThermalZone>,
    pub economizer_enabled: bool,
    /// Supply temperature setpoint in °C used to decide whether free cooling is possible.
    pub economizer_setpoint_c: f64,
}
