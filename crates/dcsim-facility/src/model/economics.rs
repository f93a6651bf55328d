//! Economics layer: electricity supply, tariffs, carbon accounting and capital costs.

use serde::{Deserialize, Serialize};

use dcsim_models::tariff::TouSchedule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    CapexBuilding,
    CapexPower,
    CapexCooling,
    CapexIt,
    CapexNetwork,
    OpexElectricity,
    OpexStaff,
    OpexMaintenance,
    OpexOther,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectricitySourceType {
    Grid,
    RenewablePpa,
    OnsiteSolar,
    OnsiteWind,
    BatteryStorage,
}

/// What the operator optimizes the electricity supply for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationTarget {
    Cost,
    Carbon,
    Balanced,
}

/// Share of the facility consumption supplied by a single source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectricitySource {
    pub source_type: ElectricitySourceType,
    pub name: String,
    /// Share of the consumption in 0-100 range.
    pub percentage: f64,
    pub cost_per_kwh: f64,
    pub carbon_intensity_g_per_kwh: f64,
    pub is_renewable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectricityRate {
    pub energy_rate_per_kwh: f64,
    pub demand_rate_per_kw: f64,
    pub tou: TouSchedule,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarbonAccounting {
    pub grid_intensity_g_per_kwh: f64,
    /// Share of renewable PPA power in 0.0-1.0 range.
    pub renewable_pct: f64,
    pub ppa_rate_per_mwh: f64,
    pub ppa_carbon_intensity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapexItem {
    pub category: CostCategory,
    pub description: String,
    pub amount_usd: f64,
    pub useful_life_years: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialModel {
    pub facility_name: String,
    pub it_capacity_mw: f64,
    pub capex_items: Vec<CapexItem>,
    pub electricity_rate: ElectricityRate,
    /// Used only when no electricity sources are configured.
    pub carbon: CarbonAccounting,
    pub electricity_sources: Vec<ElectricitySource>,
    pub optimization_target: OptimizationTarget,
    pub utilization_pct: f64,
    pub staff_count: u32,
    pub staff_cost_per_fte: f64,
    pub maintenance_pct_of_capex: f64,
    pub revenue_per_gpu_hour: Option<f64>,
}
