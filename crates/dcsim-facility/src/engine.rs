//! Timestep orchestrator.
//!
//! A step is a pure function of the state: it returns the state of the facility after
//! `time_step_hours`, computing all layers in a fixed order. Playback pacing is left to the caller.

use chrono::{Duration, Timelike};

use crate::calc::compute::{
    available_accelerators, average_utilization, cluster_power, failed_accelerators, total_accelerators,
};
use crate::calc::economics::{hourly_carbon, hourly_cost};
use crate::calc::power::total_distribution_losses;
use crate::calc::thermal::{average_zone_temperature, cooling_capacity_used_pct, cooling_power, economizer_engaged};
use crate::calc::workload::{average_queue_time_hours, count_jobs};
use crate::data::profiles::{electricity_profile, weather_profile, workload_pattern};
use crate::failures::{accumulate_effects, advance_failures, mark_failed, reset_health, throttle_factor};
use crate::log::LogContext;
use crate::model::compute::HealthStatus;
use crate::model::failures::FailureEvent;
use crate::model::state::{HistorySample, SimulationMetrics, SimulationState};
use crate::model::workload::JobState;
use crate::{log_debug, log_error, log_info, log_trace, log_warn};

/// Returns the state after a single time step.
pub fn step(state: &SimulationState) -> SimulationState {
    let mut next = state.clone();
    advance(&mut next);
    next
}

/// Returns the state after `steps` sequential time steps.
pub fn run_steps(state: &SimulationState, steps: u32) -> SimulationState {
    let mut next = state.clone();
    for _ in 0..steps {
        advance(&mut next);
    }
    next
}

/// Returns the state with the failure added to the active failures.
///
/// The failure should be already activated (see [`FailureInjector`](crate::failures::FailureInjector)),
/// inactive failures are dropped at the next step. Failures with duplicate ids are not merged.
pub fn inject_failure(state: &SimulationState, failure: FailureEvent) -> SimulationState {
    let mut next = state.clone();
    let ctx = LogContext::new("failures", next.current_time);
    log_info!(
        ctx,
        "injected {:?} failure {} for {} h",
        failure.failure_type,
        failure.id,
        failure.duration_hours
    );
    next.active_failures.push(failure);
    next
}

fn step_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.).round() as i64)
}

/// Refreshes weather and electricity price from the configured profiles.
fn refresh_conditions(state: &mut SimulationState, hour: u32, ctx: &LogContext) {
    if let Some(key) = &state.weather_profile {
        match weather_profile(key) {
            Some(profile) => state.weather = profile.at_hour(hour),
            None => log_warn!(ctx, "unknown weather profile {}, weather is not updated", key),
        }
    }
    if let Some(key) = &state.electricity_profile {
        match electricity_profile(key) {
            Some(profile) => state.electricity_price = profile.price_at_hour(hour),
            None => log_warn!(ctx, "unknown electricity profile {}, price is not updated", key),
        }
    }
}

/// Returns utilization of healthy accelerators before throttling.
fn target_utilization(state: &SimulationState, hour: u32, ctx: &LogContext) -> f64 {
    match &state.workload_profile {
        Some(key) => match workload_pattern(key) {
            Some(pattern) => pattern.utilization_at_hour(hour),
            None => {
                log_warn!(ctx, "unknown workload profile {}, using target utilization", key);
                state.target_utilization
            }
        },
        None => state.target_utilization,
    }
}

fn advance(state: &mut SimulationState) {
    let ctx = LogContext::new("engine", state.current_time);
    let failures_ctx = LogContext::new("failures", state.current_time);
    let hour = state.current_time.hour();
    let prev = state.metrics.clone();

    // failure lifecycle and effects
    for failure in advance_failures(&mut state.active_failures, state.time_step_hours) {
        log_info!(failures_ctx, "failure {} ({}) is over", failure.name, failure.id);
    }
    reset_health(&mut state.cluster);
    let total_gpus = total_accelerators(&state.cluster);
    let effects = accumulate_effects(&state.active_failures, total_gpus);
    let marked = mark_failed(&mut state.cluster, effects.gpus_to_fail);
    if marked > 0 {
        log_debug!(failures_ctx, "{} of {} accelerators are offline", marked, total_gpus);
    }
    if effects.cooling_efficiency_multiplier <= 0. {
        log_error!(
            failures_ctx,
            "cooling capacity is lost (efficiency {}), cooling power is unbounded",
            effects.cooling_efficiency_multiplier
        );
    }
    let throttle = throttle_factor(effects.cooling_efficiency_multiplier);
    if throttle != prev.thermal_throttle_factor {
        log_debug!(
            failures_ctx,
            "thermal throttle factor {} -> {} (cooling efficiency {:.3})",
            prev.thermal_throttle_factor,
            throttle,
            effects.cooling_efficiency_multiplier
        );
    }

    // time-varying conditions
    refresh_conditions(state, hour, &ctx);
    let utilization = target_utilization(state, hour, &ctx) * throttle;
    for acc in state
        .cluster
        .accelerators_mut()
        .filter(|acc| acc.health_status == HealthStatus::Healthy)
    {
        acc.current_utilization = utilization;
        acc.is_throttled = throttle < 1.;
        acc.throttle_factor = throttle;
    }

    // power and cooling
    let it_power = cluster_power(&state.cluster);
    let distribution_losses = total_distribution_losses(&state.power_system);
    let heat_load = it_power + distribution_losses;
    let economizer_active = economizer_engaged(&state.cooling_system, &state.weather);
    if economizer_active != prev.economizer_active {
        log_debug!(
            ctx,
            "economizer {} at wet bulb {} °C",
            if economizer_active { "engaged" } else { "disengaged" },
            state.weather.wet_bulb_temp_c
        );
    }
    let cooling = cooling_power(&state.cooling_system, heat_load, &state.weather) / effects.cooling_efficiency_multiplier;
    let total_power = it_power + cooling + distribution_losses;
    let pue = dcsim_models::thermal::pue(it_power, cooling, distribution_losses);
    log_trace!(
        ctx,
        "IT {:.1} kW, cooling {:.1} kW, losses {:.1} kW, PUE {:.3}",
        it_power,
        cooling,
        distribution_losses,
        pue
    );

    // economics
    let consumption_kwh = total_power * state.time_step_hours;
    let cost = hourly_cost(&state.financial_model, consumption_kwh, hour);
    let carbon = hourly_carbon(&state.financial_model, consumption_kwh / 1000.);

    let metrics = SimulationMetrics {
        it_power_kw: it_power,
        cooling_power_kw: cooling,
        distribution_losses_kw: distribution_losses,
        total_power_kw: total_power,
        pue,
        avg_zone_temp_c: average_zone_temperature(&state.cooling_system),
        cooling_capacity_used_pct: cooling_capacity_used_pct(&state.cooling_system, heat_load),
        economizer_active,
        total_gpus,
        available_gpus: available_accelerators(&state.cluster),
        failed_gpus: failed_accelerators(&state.cluster),
        avg_gpu_utilization: average_utilization(&state.cluster),
        cooling_efficiency_multiplier: effects.cooling_efficiency_multiplier,
        thermal_throttle_factor: throttle,
        jobs_queued: count_jobs(&state.scheduler, JobState::Queued),
        jobs_running: count_jobs(&state.scheduler, JobState::Running),
        jobs_completed: count_jobs(&state.scheduler, JobState::Completed),
        avg_queue_time_hours: average_queue_time_hours(&state.scheduler),
        hourly_cost_usd: cost,
        hourly_carbon_kg: carbon,
        cumulative_cost_usd: prev.cumulative_cost_usd + cost,
        cumulative_carbon_kg: prev.cumulative_carbon_kg + carbon,
    };

    state.history.push(HistorySample {
        timestamp: state.current_time,
        it_power,
        cooling_power: cooling,
        total_power,
        pue,
        gpu_utilization: metrics.avg_gpu_utilization * 100.,
        cost_rate: cost,
        temperature: metrics.avg_zone_temp_c,
        ambient_temp: state.weather.dry_bulb_temp_c,
        carbon_rate: carbon,
    });
    state.metrics = metrics;
    state.current_time += step_duration(state.time_step_hours);
}
