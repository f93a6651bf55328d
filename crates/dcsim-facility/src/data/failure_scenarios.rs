//! Catalog of predefined failure scenarios.
//!
//! Scenario failures are inactive templates, use
//! [`FailureInjector`](crate::failures::FailureInjector) to turn them into injectable events.

use crate::model::failures::{FailureEvent, FailureScenario, FailureType};

pub const FAILURE_SCENARIO_KEYS: [&str; 5] = [
    "single_chiller",
    "ups_trip",
    "pdu_failure",
    "cascading_thermal",
    "rack_failure",
];

fn template(
    id: &str,
    failure_type: FailureType,
    name: &str,
    description: &str,
    duration_hours: f64,
    capacity_reduction_pct: f64,
    performance_degradation_pct: f64,
) -> FailureEvent {
    FailureEvent {
        id: id.to_string(),
        failure_type,
        name: name.to_string(),
        description: description.to_string(),
        start_time: None,
        duration_hours,
        is_active: false,
        impacted_component_ids: Vec::new(),
        capacity_reduction_pct: Some(capacity_reduction_pct),
        performance_degradation_pct: Some(performance_degradation_pct),
    }
}

fn scenario(id: &str, name: &str, description: &str, failures: Vec<FailureEvent>) -> FailureScenario {
    FailureScenario {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        failures,
    }
}

/// Returns the failure scenario with the given key.
pub fn failure_scenario(key: &str) -> Option<FailureScenario> {
    let scenario = match key {
        "single_chiller" => scenario(
            key,
            "Single Chiller Failure",
            "One chiller fails, N+1 redundancy takes over",
            vec![template(
                "chiller_1_fail",
                FailureType::ChillerFailure,
                "Chiller 1 Failure",
                "Primary chiller fails, backup engages",
                4.,
                0.,
                10.,
            )],
        ),
        "ups_trip" => scenario(
            key,
            "UPS Trip with Battery Ride-Through",
            "Utility power loss, UPS switches to battery",
            vec![template(
                "ups_battery_mode",
                FailureType::UpsTrip,
                "UPS Battery Mode",
                "Grid power lost, running on batteries",
                0.25,
                0.,
                0.,
            )],
        ),
        "pdu_failure" => scenario(
            key,
            "PDU Failure (2N Architecture)",
            "One PDU path fails, load shifts to redundant path",
            vec![template(
                "pdu_a_fail",
                FailureType::PduFailure,
                "PDU-A Failure",
                "A-side PDU fails, all load on B-side",
                2.,
                0.,
                0.,
            )],
        ),
        "cascading_thermal" => scenario(
            key,
            "Cascading Thermal Event",
            "Multiple chillers fail during peak load",
            vec![
                template(
                    "chiller_1_cascade",
                    FailureType::ChillerFailure,
                    "Chiller 1 Failure",
                    "First chiller fails",
                    3.,
                    20.,
                    15.,
                ),
                template(
                    "chiller_2_cascade",
                    FailureType::ChillerFailure,
                    "Chiller 2 Failure",
                    "Second chiller fails 30min later",
                    2.5,
                    40.,
                    30.,
                ),
            ],
        ),
        "rack_failure" => scenario(
            key,
            "GPU Rack Failure",
            "Entire rack of GPUs goes offline",
            vec![template(
                "rack_01_fail",
                FailureType::GpuRackFailure,
                "Rack 01 Failure",
                "Complete rack failure, GPUs unavailable",
                6.,
                1.25,
                0.,
            )],
        ),
        _ => return None,
    };
    Some(scenario)
}
