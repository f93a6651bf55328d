use approx::assert_relative_eq;
use chrono::NaiveDate;
use rstest::rstest;

use dcsim_facility::assembler::{build, start_time};
use dcsim_facility::model::economics::{ElectricitySourceType, OptimizationTarget};
use dcsim_facility::model::power::RedundancyMode;
use dcsim_facility::model::thermal::{ChillerStatus, CoolingType};
use dcsim_facility::{ConfigError, ScenarioParams};

fn params(count: u32) -> ScenarioParams {
    ScenarioParams::new("iowa", "H100_SXM", count, 0.85, 25., 18.)
}

#[test]
fn test_start_time() {
    let expected = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(start_time(), expected);
}

#[test]
fn test_initial_state() {
    let state = build(&params(80)).unwrap();
    assert_eq!(state.current_time, start_time());
    assert_eq!(state.time_step_hours, 1.);
    assert!(state.history.is_empty());
    assert!(state.active_failures.is_empty());
    assert_eq!(state.metrics.pue, 1.);
    assert_eq!(state.metrics.total_gpus, 80);
    assert_eq!(state.metrics.available_gpus, 80);
    assert_eq!(state.metrics.cumulative_cost_usd, 0.);
    assert_eq!(state.electricity_price, 0.055);
    assert_eq!(state.weather.dry_bulb_temp_c, 25.);
    assert_eq!(state.weather.wet_bulb_temp_c, 18.);
    assert_eq!(state.weather.humidity_pct, 50.);
}

#[rstest]
#[case(8, 1, 1)]
#[case(64, 8, 1)]
#[case(80, 10, 2)]
#[case(100, 13, 2)]
#[case(1000, 125, 16)]
fn test_cluster_layout(#[case] count: u32, #[case] nodes: usize, #[case] racks: usize) {
    let state = build(&params(count)).unwrap();
    let cluster = &state.cluster;
    assert_eq!(cluster.racks.len(), racks);
    assert_eq!(cluster.racks.iter().map(|rack| rack.nodes.len()).sum::<usize>(), nodes);
    assert_eq!(cluster.accelerators().count(), count as usize);
    assert!(cluster.racks.iter().all(|rack| rack.nodes.len() <= 8));
    assert!(cluster
        .racks
        .iter()
        .flat_map(|rack| rack.nodes.iter())
        .all(|node| node.accelerators.len() <= 8));
    assert_eq!(cluster.spine_switches.len(), 2);
    assert!(cluster.leaf_switches.is_empty());
}

#[test]
fn test_component_ids() {
    let state = build(&params(100)).unwrap();
    let cluster = &state.cluster;
    let ids = cluster.accelerators().map(|acc| acc.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids[0], "gpu-0");
    assert_eq!(ids[99], "gpu-99");

    let rack = &cluster.racks[1];
    assert_eq!(rack.id, "rack-1");
    assert_eq!(rack.row, "A");
    assert_eq!(rack.position, 1);
    let node = &rack.nodes[4];
    assert_eq!(node.id, "node-1-4");
    assert_eq!(node.rack_id, "rack-1");
    assert_eq!(node.rack_position_u, 21);
    assert_eq!(node.accelerators.len(), 4);
    assert!(node.accelerators.iter().all(|acc| acc.node_id == "node-1-4"));

    let state = build(&params(8 * 8 * 11)).unwrap();
    assert_eq!(state.cluster.racks[10].row, "B");
    assert_eq!(state.cluster.racks[10].position, 0);
}

#[test]
// Estimated IT load of 80 accelerators at 85% is 80 * 700 * 0.85 / 1000 = 47.6 kW.
fn test_infrastructure_sizing() {
    let state = build(&params(80)).unwrap();
    let it_load = 80. * 700. * 0.85 / 1000.;

    let paths = &state.power_system.paths;
    assert_eq!(paths.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(paths["A"].id, "path-a");
    assert_eq!(paths["B"].ups_units[0].id, "ups-b");
    assert_eq!(paths["B"].ups_units[0].redundancy_group, "B");
    for path in paths.values() {
        assert_relative_eq!(path.transformers[0].capacity_kva, it_load * 1.5);
        assert_relative_eq!(path.transformers[0].current_load_kw, it_load / 2.);
        assert_relative_eq!(path.ups_units[0].capacity_kva, it_load * 0.75);
        assert_relative_eq!(path.pdus[0].current_load_kw, it_load / 2.);
        assert_eq!(path.pdus[0].efficiency, 0.985);
    }
    assert_eq!(state.power_system.redundancy_mode, RedundancyMode::NPlus1);

    let cooling = &state.cooling_system;
    assert_eq!(cooling.cooling_type, CoolingType::D2c);
    assert!(cooling.economizer_enabled);
    assert_eq!(cooling.economizer_setpoint_c, 15.);
    assert_eq!(cooling.chillers.len(), 3);
    let running = cooling
        .chillers
        .iter()
        .filter(|chiller| chiller.status == ChillerStatus::Running)
        .count();
    assert_eq!(running, 2);
    assert_relative_eq!(cooling.chillers[0].capacity_kw, it_load * 1.3 / 2.);
    assert_eq!(cooling.zones[0].rack_ids, vec!["rack-0", "rack-1"]);
}

#[test]
fn test_financial_model() {
    let state = build(&params(80)).unwrap();
    let model = &state.financial_model;
    assert_eq!(model.facility_name, "Iowa (Wind Belt)");
    assert_eq!(model.capex_items.len(), 3);
    assert_eq!(model.capex_items[0].amount_usd, 80. * 30000.);
    assert!(!model.electricity_rate.tou.enabled);
    assert_eq!(model.electricity_rate.tou.peak_hours, vec![14, 15, 16, 17, 18, 19]);
    assert_eq!(model.optimization_target, OptimizationTarget::Balanced);

    let sources = &model.electricity_sources;
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].source_type, ElectricitySourceType::Grid);
    assert_eq!(sources[0].percentage, 80.);
    assert_eq!(sources[0].cost_per_kwh, 0.055);
    assert_eq!(sources[0].carbon_intensity_g_per_kwh, 350.);
    assert_eq!(sources[1].name, "Wind PPA");
    assert_eq!(sources[1].percentage, 20.);
}

#[test]
fn test_scenario_file() {
    let params = ScenarioParams::from_file("test-configs/summer.yaml").unwrap();
    let state = build(&params).unwrap();
    assert_eq!(state.cluster.accelerators().count(), 640);
    assert_eq!(state.cluster.accelerators().next().unwrap().spec.tdp_watts, 1000.);
    assert_eq!(state.power_system.redundancy_mode, RedundancyMode::TwoN);
    assert_eq!(state.cooling_system.cooling_type, CoolingType::ImmersionSinglePhase);
    assert_eq!(state.weather_profile.as_deref(), Some("typical_summer"));
    assert_eq!(state.workload_profile.as_deref(), Some("batch_training"));
    assert_eq!(state.electricity_profile.as_deref(), Some("tou_extreme"));
    assert_eq!(state.financial_model.optimization_target, OptimizationTarget::Cost);
    // scenario doesn't set temperatures
    assert_eq!(state.weather.dry_bulb_temp_c, 25.);
}

#[test]
fn test_unknown_keys() {
    let mut p = params(80);
    p.location = "atlantis".to_string();
    assert!(matches!(build(&p), Err(ConfigError::UnknownLocation(key)) if key == "atlantis"));

    let mut p = params(80);
    p.accelerator_type = "TPU".to_string();
    assert!(matches!(build(&p), Err(ConfigError::UnknownAccelerator(_))));

    let mut p = params(80);
    p.weather_profile = Some("monsoon".to_string());
    assert!(matches!(build(&p), Err(ConfigError::UnknownWeatherProfile(_))));

    let mut p = params(80);
    p.workload_profile = Some("crypto".to_string());
    assert!(matches!(build(&p), Err(ConfigError::UnknownWorkloadProfile(_))));

    let mut p = params(80);
    p.electricity_profile = Some("free".to_string());
    assert!(matches!(build(&p), Err(ConfigError::UnknownElectricityProfile(_))));
}

#[rstest]
#[case(-0.1)]
#[case(1.01)]
#[case(f64::NAN)]
fn test_invalid_target_utilization(#[case] target: f64) {
    let mut p = params(80);
    p.target_utilization = target;
    assert!(matches!(build(&p), Err(ConfigError::InvalidTargetUtilization(_))));
}

#[test]
fn test_invalid_accelerator_count() {
    assert!(matches!(build(&params(0)), Err(ConfigError::InvalidAcceleratorCount)));
    assert!(build(&params(1)).is_ok());
}
