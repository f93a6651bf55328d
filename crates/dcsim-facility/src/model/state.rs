//! Simulation state, derived metrics and metrics history.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::compute::Cluster;
use crate::model::economics::FinancialModel;
use crate::model::failures::FailureEvent;
use crate::model::power::PowerSystem;
use crate::model::thermal::{CoolingSystem, WeatherConditions};
use crate::model::workload::Scheduler;

/// Maximum number of samples kept in each history series.
pub const HISTORY_CAPACITY: usize = 100;

/// Facility metrics computed at each step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    // power
    pub it_power_kw: f64,
    pub cooling_power_kw: f64,
    pub distribution_losses_kw: f64,
    pub total_power_kw: f64,
    pub pue: f64,
    // thermal
    pub avg_zone_temp_c: f64,
    pub cooling_capacity_used_pct: f64,
    pub economizer_active: bool,
    // compute
    pub total_gpus: usize,
    pub available_gpus: usize,
    pub failed_gpus: usize,
    pub avg_gpu_utilization: f64,
    // failure effects
    pub cooling_efficiency_multiplier: f64,
    pub thermal_throttle_factor: f64,
    // workload
    pub jobs_queued: usize,
    pub jobs_running: usize,
    pub jobs_completed: usize,
    pub avg_queue_time_hours: f64,
    // economics
    pub hourly_cost_usd: f64,
    pub hourly_carbon_kg: f64,
    /// Accumulated over all steps, never decreases.
    pub cumulative_cost_usd: f64,
    /// Accumulated over all steps, never decreases.
    pub cumulative_carbon_kg: f64,
}

impl SimulationMetrics {
    /// Metrics of a freshly assembled facility which hasn't been stepped yet.
    pub fn initial(total_gpus: usize) -> Self {
        Self {
            it_power_kw: 0.,
            cooling_power_kw: 0.,
            distribution_losses_kw: 0.,
            total_power_kw: 0.,
            pue: 1.,
            avg_zone_temp_c: 20.,
            cooling_capacity_used_pct: 0.,
            economizer_active: false,
            total_gpus,
            available_gpus: total_gpus,
            failed_gpus: 0,
            avg_gpu_utilization: 0.,
            cooling_efficiency_multiplier: 1.,
            thermal_throttle_factor: 1.,
            jobs_queued: 0,
            jobs_running: 0,
            jobs_completed: 0,
            avg_queue_time_hours: 0.,
            hourly_cost_usd: 0.,
            hourly_carbon_kg: 0.,
            cumulative_cost_usd: 0.,
            cumulative_carbon_kg: 0.,
        }
    }
}

/// Values appended to the history at one step.
#[derive(Clone, Debug, PartialEq)]
pub struct HistorySample {
    pub timestamp: NaiveDateTime,
    pub it_power: f64,
    pub cooling_power: f64,
    pub total_power: f64,
    pub pue: f64,
    /// Average accelerator utilization in percent.
    pub gpu_utilization: f64,
    pub cost_rate: f64,
    pub temperature: f64,
    pub ambient_temp: f64,
    pub carbon_rate: f64,
}

/// Bounded history of metrics, stored as parallel series.
///
/// Series are always appended and evicted together, so the same index refers to the same step
/// in every series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    timestamps: VecDeque<NaiveDateTime>,
    it_power: VecDeque<f64>,
    cooling_power: VecDeque<f64>,
    total_power: VecDeque<f64>,
    pue: VecDeque<f64>,
    gpu_utilization: VecDeque<f64>,
    cost_rate: VecDeque<f64>,
    temperature: VecDeque<f64>,
    ambient_temp: VecDeque<f64>,
    carbon_rate: VecDeque<f64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample, evicting the oldest one from every series when the capacity is exceeded.
    pub fn push(&mut self, sample: HistorySample) {
        self.timestamps.push_back(sample.timestamp);
        self.it_power.push_back(sample.it_power);
        self.cooling_power.push_back(sample.cooling_power);
        self.total_power.push_back(sample.total_power);
        self.pue.push_back(sample.pue);
        self.gpu_utilization.push_back(sample.gpu_utilization);
        self.cost_rate.push_back(sample.cost_rate);
        self.temperature.push_back(sample.temperature);
        self.ambient_temp.push_back(sample.ambient_temp);
        self.carbon_rate.push_back(sample.carbon_rate);
        if self.timestamps.len() > HISTORY_CAPACITY {
            self.timestamps.pop_front();
            self.it_power.pop_front();
            self.cooling_power.pop_front();
            self.total_power.pop_front();
            self.pue.pop_front();
            self.gpu_utilization.pop_front();
            self.cost_rate.pop_front();
            self.temperature.pop_front();
            self.ambient_temp.pop_front();
            self.carbon_rate.pop_front();
        }
    }

    /// Returns the number of samples in each series.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &VecDeque<NaiveDateTime> {
        &self.timestamps
    }

    pub fn it_power(&self) -> &VecDeque<f64> {
        &self.it_power
    }

    pub fn cooling_power(&self) -> &VecDeque<f64> {
        &self.cooling_power
    }

    pub fn total_power(&self) -> &VecDeque<f64> {
        &self.total_power
    }

    pub fn pue(&self) -> &VecDeque<f64> {
        &self.pue
    }

    pub fn gpu_utilization(&self) -> &VecDeque<f64> {
        &self.gpu_utilization
    }

    pub fn cost_rate(&self) -> &VecDeque<f64> {
        &self.cost_rate
    }

    pub fn temperature(&self) -> &VecDeque<f64> {
        &self.temperature
    }

    pub fn ambient_temp(&self) -> &VecDeque<f64> {
        &self.ambient_temp
    }

    pub fn carbon_rate(&self) -> &VecDeque<f64> {
        &self.carbon_rate
    }

    /// Returns lengths of all series.
    pub fn series_lengths(&self) -> [usize; 10] {
        [
            self.timestamps.len(),
            self.it_power.len(),
            self.cooling_power.len(),
            self.total_power.len(),
            self.pue.len(),
            self.gpu_utilization.len(),
            self.cost_rate.len(),
            self.temperature.len(),
            self.ambient_temp.len(),
            self.carbon_rate.len(),
        ]
    }
}

/// Complete state of the simulated facility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub current_time: NaiveDateTime,
    pub time_step_hours: f64,
    pub power_system: PowerSystem,
    pub cooling_system: CoolingSystem,
    pub cluster: Cluster,
    pub scheduler: Scheduler,
    pub financial_model: FinancialModel,
    pub weather: WeatherConditions,
    /// Current electricity price in $/kWh.
    pub electricity_price: f64,
    /// Utilization of healthy accelerators when no workload profile is configured.
    pub target_utilization: f64,
    pub weather_profile: Option<String>,
    pub workload_profile: Option<String>,
    pub electricity_profile: Option<String>,
    pub active_failures: Vec<FailureEvent>,
    pub metrics: SimulationMetrics,
    pub history: History,
}
