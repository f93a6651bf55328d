//! Facility assembler: builds the initial simulation state from scenario parameters.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;

use dcsim_models::tariff::TouSchedule;

use crate::config::ScenarioParams;
use crate::data::accelerators::accelerator_type;
use crate::data::curves::{chiller_cop_curve, ups_efficiency_curve};
use crate::data::locations::{location, LocationPreset};
use crate::data::profiles::{electricity_profile, weather_profile, workload_pattern};
use crate::error::ConfigError;
use crate::log::LogContext;
use crate::log_info;
use crate::model::compute::{
    Accelerator, AcceleratorType, Cluster, ComputeNode, HealthStatus, NetworkSwitch, NetworkTopology, Rack, SwitchRole,
};
use crate::model::economics::{
    CapexItem, CarbonAccounting, CostCategory, ElectricityRate, ElectricitySource, ElectricitySourceType,
    FinancialModel, OptimizationTarget,
};
use crate::model::power::{Pdu, PowerPath, PowerSource, PowerSystem, RedundancyMode, Transformer, Ups, UpsMode};
use crate::model::state::{History, SimulationMetrics, SimulationState};
use crate::model::thermal::{
    Chiller, ChillerStatus, ChillerType, CoolingSystem, CoolingTower, CoolingType, ThermalZone, TowerType,
    WeatherConditions, ZoneType,
};
use crate::model::workload::{JobQueue, Priority, Scheduler, SchedulingAlgorithm};

pub const ACCELERATORS_PER_NODE: usize = 8;
pub const NODES_PER_RACK: usize = 8;
pub const TIME_STEP_HOURS: f64 = 1.;

/// 2025-01-15T00:00:00
const START_TIMESTAMP: i64 = 1_736_899_200;

/// Power infrastructure capacity relative to the estimated IT load.
const POWER_HEADROOM: f64 = 1.5;
/// Cooling design heat load relative to the estimated IT load.
const COOLING_OVERHEAD: f64 = 1.3;

const CPU_POWER_WATTS: f64 = 300.;
const NODE_OVERHEAD_WATTS: f64 = 200.;
const SPINE_SWITCH_POWER_WATTS: f64 = 3000.;
const ZONE_ID: &str = "zone-main";

const CAPEX_PER_ACCELERATOR: f64 = 30000.;
const POWER_CAPEX_PER_KW: f64 = 500.;
const COOLING_CAPEX_PER_KW: f64 = 300.;

/// Returns the fixed start time of all simulations.
pub fn start_time() -> NaiveDateTime {
    DateTime::<Utc>::from_timestamp(START_TIMESTAMP, 0)
        .map(|t| t.naive_utc())
        .unwrap_or_default()
}

fn validate(params: &ScenarioParams) -> Result<(), ConfigError> {
    if params.accelerator_count == 0 {
        return Err(ConfigError::InvalidAcceleratorCount);
    }
    if !(0. ..=1.).contains(&params.target_utilization) {
        return Err(ConfigError::InvalidTargetUtilization(params.target_utilization));
    }
    if let Some(key) = &params.weather_profile {
        weather_profile(key).ok_or_else(|| ConfigError::UnknownWeatherProfile(key.clone()))?;
    }
    if let Some(key) = &params.workload_profile {
        workload_pattern(key).ok_or_else(|| ConfigError::UnknownWorkloadProfile(key.clone()))?;
    }
    if let Some(key) = &params.electricity_profile {
        electricity_profile(key).ok_or_else(|| ConfigError::UnknownElectricityProfile(key.clone()))?;
    }
    Ok(())
}

/// Builds the initial state of the facility described by the parameters.
///
/// The state has zeroed metrics and empty history. Unknown location, accelerator or profile keys
/// are reported as [`ConfigError`].
pub fn build(params: &ScenarioParams) -> Result<SimulationState, ConfigError> {
    let location = location(&params.location).ok_or_else(|| ConfigError::UnknownLocation(params.location.clone()))?;
    let spec = accelerator_type(&params.accelerator_type)
        .ok_or_else(|| ConfigError::UnknownAccelerator(params.accelerator_type.clone()))?;
    validate(params)?;

    let count = params.accelerator_count as usize;
    let it_load = count as f64 * spec.tdp_watts * params.target_utilization / 1000.;
    let cluster = build_cluster(count, Arc::new(spec), params.target_utilization);
    let power_system = build_power_system(it_load, params.redundancy_mode.unwrap_or(RedundancyMode::NPlus1));
    let mut cooling_system = build_cooling_system(
        it_load * COOLING_OVERHEAD,
        params.cooling_type.unwrap_or(CoolingType::D2c),
        params.economizer_enabled.unwrap_or(true),
    );
    for zone in cooling_system.zones.iter_mut() {
        zone.rack_ids = cluster.racks.iter().map(|rack| rack.id.clone()).collect();
    }
    let financial_model = build_financial_model(location, count, it_load, params);

    let state = SimulationState {
        current_time: start_time(),
        time_step_hours: TIME_STEP_HOURS,
        power_system,
        cooling_system,
        cluster,
        scheduler: build_scheduler(),
        financial_model,
        weather: WeatherConditions {
            dry_bulb_temp_c: params.ambient_temp_c,
            wet_bulb_temp_c: params.wet_bulb_temp_c,
            humidity_pct: 50.,
        },
        electricity_price: location.electricity_rate,
        target_utilization: params.target_utilization,
        weather_profile: params.weather_profile.clone(),
        workload_profile: params.workload_profile.clone(),
        electricity_profile: params.electricity_profile.clone(),
        active_failures: Vec::new(),
        metrics: SimulationMetrics::initial(count),
        history: History::new(),
    };

    let ctx = LogContext::new("assembler", state.current_time);
    log_info!(
        ctx,
        "built facility at {}: {} x {} in {} racks, estimated IT load {:.1} kW",
        location.name,
        count,
        params.accelerator_type,
        state.cluster.racks.len(),
        it_load
    );
    Ok(state)
}

// COMPUTE -------------------------------------------------------------------------------------------------------------

fn build_cluster(count: usize, spec: Arc<AcceleratorType>, target_utilization: f64) -> Cluster {
    let node_count = (count + ACCELERATORS_PER_NODE - 1) / ACCELERATORS_PER_NODE;
    let rack_count = (node_count + NODES_PER_RACK - 1) / NODES_PER_RACK;
    let mut index = 0;
    let mut racks = Vec::with_capacity(rack_count);
    for r in 0..rack_count {
        let rack_id = format!("rack-{}", r);
        let mut nodes = Vec::new();
        for n in 0..NODES_PER_RACK {
            if index >= count {
                break;
            }
            let node_id = format!("node-{}-{}", r, n);
            let mut accelerators = Vec::new();
            while accelerators.len() < ACCELERATORS_PER_NODE && index < count {
                accelerators.push(Accelerator {
                    id: format!("gpu-{}", index),
                    spec: spec.clone(),
                    node_id: node_id.clone(),
                    current_utilization: target_utilization,
                    current_temperature_c: 65.,
                    memory_used_gb: spec.memory_gb * 0.7,
                    health_status: HealthStatus::Healthy,
                    is_throttled: false,
                    throttle_factor: 1.,
                });
                index += 1;
            }
            nodes.push(ComputeNode {
                id: node_id,
                node_type: "DGX-H100".to_string(),
                rack_id: rack_id.clone(),
                rack_position_u: n as u32 * 5 + 1,
                accelerators,
                cpu_count: 2,
                cpu_power_watts: CPU_POWER_WATTS,
                system_memory_gb: 2048.,
                overhead_power_watts: NODE_OVERHEAD_WATTS,
            });
        }
        racks.push(Rack {
            id: rack_id,
            row: char::from_u32('A' as u32 + (r / 10) as u32)
                .map(String::from)
                .unwrap_or_default(),
            position: (r % 10) as u32,
            nodes,
            max_power_kw: 55.,
            pdu_a_id: "pdu-a".to_string(),
            pdu_b_id: "pdu-b".to_string(),
            cooling_zone_id: ZONE_ID.to_string(),
            inlet_temp_c: 22.,
            outlet_temp_c: 40.,
        });
    }
    let spine = |id: &str| NetworkSwitch {
        id: id.to_string(),
        role: SwitchRole::Spine,
        port_count: 64,
        port_speed_gbps: 400.,
        power_watts: SPINE_SWITCH_POWER_WATTS,
    };
    Cluster {
        id: "cluster-main".to_string(),
        racks,
        spine_switches: vec![spine("spine-1"), spine("spine-2")],
        leaf_switches: Vec::new(),
        network_topology: NetworkTopology::FatTree,
    }
}

// POWER ---------------------------------------------------------------------------------------------------------------

fn build_power_path(name: &str, it_load: f64) -> PowerPath {
    let suffix = name.to_lowercase();
    let capacity = it_load * POWER_HEADROOM;
    let load = it_load / 2.;
    PowerPath {
        id: format!("path-{}", suffix),
        sources: vec![PowerSource::grid(&format!("grid-{}", suffix), capacity, load, 0.055, 350.)],
        transformers: vec![Transformer {
            id: format!("xfmr-{}", suffix),
            capacity_kva: capacity,
            voltage_primary: 13800.,
            voltage_secondary: 480.,
            current_load_kw: load,
            no_load_loss_kw: 5.,
            full_load_loss_kw: 15.,
        }],
        ups_units: vec![Ups {
            id: format!("ups-{}", suffix),
            capacity_kva: capacity / 2.,
            current_load_kw: load,
            mode: UpsMode::Online,
            redundancy_group: name.to_string(),
            is_healthy: true,
            battery_runtime_minutes: 15.,
            battery_health_pct: 100.,
            efficiency_curve: ups_efficiency_curve(),
        }],
        pdus: vec![Pdu {
            id: format!("pdu-{}", suffix),
            capacity_kw: capacity / 2.,
            voltage_in: 480.,
            voltage_out: 208.,
            current_load_kw: load,
            efficiency: 0.985,
            redundancy_group: name.to_string(),
        }],
    }
}

fn build_power_system(it_load: f64, redundancy_mode: RedundancyMode) -> PowerSystem {
    let mut paths = IndexMap::new();
    for name in ["A", "B"] {
        paths.insert(name.to_string(), build_power_path(name, it_load));
    }
    PowerSystem { paths, redundancy_mode }
}

// COOLING -------------------------------------------------------------------------------------------------------------

fn build_cooling_system(heat_load: f64, cooling_type: CoolingType, economizer_enabled: bool) -> CoolingSystem {
    // N+1: any two chillers carry the design load
    let chiller_capacity = heat_load / 2.;
    let chiller = |id: &str, status: ChillerStatus, load_pct: f64| Chiller {
        id: id.to_string(),
        chiller_type: ChillerType::WaterCooled,
        capacity_kw: chiller_capacity,
        current_load_pct: load_pct,
        status,
        chw_supply_temp_c: 7.,
        chw_return_temp_c: 12.,
        cop_curve: chiller_cop_curve(),
    };
    CoolingSystem {
        cooling_type,
        chillers: vec![
            chiller("chiller-1", ChillerStatus::Running, 0.5),
            chiller("chiller-2", ChillerStatus::Running, 0.5),
            chiller("chiller-3", ChillerStatus::Standby, 0.),
        ],
        cooling_towers: vec![CoolingTower {
            id: "tower-1".to_string(),
            tower_type: TowerType::Wet,
            capacity_kw: heat_load,
            fan_power_kw: 50.,
            pump_power_kw: 75.,
            water_consumption_l_per_kwh: 1.8,
            approach_temp_c: 5.,
            range_temp_c: 10.,
        }],
        crah_units: Vec::new(),
        cdus: Vec::new(),
        zones: vec![ThermalZone {
            id: ZONE_ID.to_string(),
            zone_type: ZoneType::DataHall,
            current_temp_c: 22.,
            humidity_pct: 45.,
            target_temp_c: 22.,
            temp_high_alarm_c: 27.,
            temp_critical_c: 32.,
            rack_ids: Vec::new(),
            cooling_unit_ids: vec!["chiller-1".to_string(), "chiller-2".to_string()],
            volume_m3: 10000.,
        }],
        economizer_enabled,
        economizer_setpoint_c: 15.,
    }
}

// WORKLOAD ------------------------------------------------------------------------------------------------------------

fn build_scheduler() -> Scheduler {
    Scheduler {
        queues: vec![JobQueue {
            id: "queue-default".to_string(),
            name: "Default Queue".to_string(),
            jobs: Vec::new(),
            max_queue_depth: 1000,
            default_priority: Priority::Standard,
        }],
        scheduling_algorithm: SchedulingAlgorithm::Fifo,
    }
}

// ECONOMICS -----------------------------------------------------------------------------------------------------------

fn default_electricity_sources(location: &LocationPreset) -> Vec<ElectricitySource> {
    vec![
        ElectricitySource {
            source_type: ElectricitySourceType::Grid,
            name: "Grid Power".to_string(),
            percentage: 80.,
            cost_per_kwh: location.electricity_rate,
            carbon_intensity_g_per_kwh: location.carbon_intensity,
            is_renewable: false,
        },
        ElectricitySource {
            source_type: ElectricitySourceType::RenewablePpa,
            name: "Wind PPA".to_string(),
            percentage: 20.,
            cost_per_kwh: 0.03,
            carbon_intensity_g_per_kwh: 0.,
            is_renewable: true,
        },
    ]
}

fn build_financial_model(
    location: &LocationPreset,
    accelerator_count: usize,
    it_load: f64,
    params: &ScenarioParams,
) -> FinancialModel {
    let capex_item = |category: CostCategory, description: &str, amount_usd: f64, useful_life_years: f64| CapexItem {
        category,
        description: description.to_string(),
        amount_usd,
        useful_life_years,
    };
    FinancialModel {
        facility_name: location.name.to_string(),
        it_capacity_mw: it_load / 1000.,
        capex_items: vec![
            capex_item(
                CostCategory::CapexIt,
                "GPU Servers",
                accelerator_count as f64 * CAPEX_PER_ACCELERATOR,
                4.,
            ),
            capex_item(CostCategory::CapexPower, "Power Infrastructure", it_load * POWER_CAPEX_PER_KW, 20.),
            capex_item(
                CostCategory::CapexCooling,
                "Cooling Infrastructure",
                it_load * COOLING_CAPEX_PER_KW,
                15.,
            ),
        ],
        electricity_rate: ElectricityRate {
            energy_rate_per_kwh: location.electricity_rate,
            demand_rate_per_kw: 10.,
            tou: TouSchedule {
                enabled: false,
                peak_hours: (14..=19).collect(),
                peak_multiplier: 1.5,
                offpeak_multiplier: 0.7,
            },
        },
        carbon: CarbonAccounting {
            grid_intensity_g_per_kwh: location.carbon_intensity,
            renewable_pct: 0.2,
            ppa_rate_per_mwh: 30.,
            ppa_carbon_intensity: 0.,
        },
        electricity_sources: params
            .electricity_sources
            .clone()
            .unwrap_or_else(|| default_electricity_sources(location)),
        optimization_target: params.optimization_target.unwrap_or(OptimizationTarget::Balanced),
        utilization_pct: 85.,
        staff_count: 50,
        staff_cost_per_fte: 120000.,
        maintenance_pct_of_capex: 0.05,
        revenue_per_gpu_hour: None,
    }
}
