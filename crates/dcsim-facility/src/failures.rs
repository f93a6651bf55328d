//! Failure-effects processor.
//!
//! Failure effects are re-derived from scratch at every step: all accelerators are reset to healthy
//! and then the accelerators taken offline by the currently active failures are marked as failed.

use chrono::NaiveDateTime;
use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::data::failure_scenarios::failure_scenario;
use crate::error::ConfigError;
use crate::model::compute::{Cluster, HealthStatus};
use crate::model::failures::{FailureEvent, FailureType};

/// Combined effect of the active failures at one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FailureEffects {
    /// Cooling power is divided by this value, 1 means no degradation.
    pub cooling_efficiency_multiplier: f64,
    /// Number of accelerators taken offline.
    pub gpus_to_fail: usize,
}

impl Default for FailureEffects {
    fn default() -> Self {
        Self {
            cooling_efficiency_multiplier: 1.,
            gpus_to_fail: 0,
        }
    }
}

/// Decrements remaining duration of the active failures and removes failures which are no longer active.
///
/// Returns the failures which expired at this step.
pub fn advance_failures(failures: &mut Vec<FailureEvent>, elapsed_hours: f64) -> Vec<FailureEvent> {
    let mut expired = Vec::new();
    for failure in failures.iter_mut().filter(|f| f.is_active) {
        let remaining = failure.duration_hours - elapsed_hours;
        if remaining <= 0. {
            failure.is_active = false;
            failure.duration_hours = 0.;
            expired.push(failure.clone());
        } else {
            failure.duration_hours = remaining;
        }
    }
    failures.retain(|f| f.is_active);
    expired
}

/// Accumulates effects of the active failures.
///
/// Cooling degradations compound multiplicatively, rack failures add up.
/// Power path failures (PDU, UPS, generator) are absorbed by the redundant paths and have no effect.
pub fn accumulate_effects(failures: &[FailureEvent], total_gpus: usize) -> FailureEffects {
    let mut multiplier = 1.;
    let mut gpus_to_fail: i64 = 0;
    for failure in failures.iter().filter(|f| f.is_active) {
        match failure.failure_type {
            FailureType::ChillerFailure | FailureType::CoolingTowerFailure => {
                multiplier *= 1. - failure.performance_degradation_pct.unwrap_or(0.) / 100.;
            }
            FailureType::GpuRackFailure => {
                let reduction = failure.capacity_reduction_pct.unwrap_or(0.);
                gpus_to_fail += (total_gpus as f64 * reduction / 100.).floor() as i64;
            }
            FailureType::PduFailure | FailureType::UpsTrip | FailureType::GeneratorStartFail => {}
        }
    }
    FailureEffects {
        cooling_efficiency_multiplier: multiplier,
        gpus_to_fail: gpus_to_fail.max(0) as usize,
    }
}

/// Returns thermal throttle factor of accelerators for the given cooling efficiency multiplier.
pub fn throttle_factor(cooling_efficiency_multiplier: f64) -> f64 {
    if cooling_efficiency_multiplier < 0.6 {
        0.7
    } else if cooling_efficiency_multiplier < 0.8 {
        0.9
    } else {
        1.
    }
}

/// Marks all accelerators as healthy and unthrottled.
pub fn reset_health(cluster: &mut Cluster) {
    for acc in cluster.accelerators_mut() {
        acc.health_status = HealthStatus::Healthy;
        acc.is_throttled = false;
        acc.throttle_factor = 1.;
    }
}

/// Marks the first `count` accelerators (in rack, node, accelerator order) as failed with zero utilization.
///
/// Returns the number of marked accelerators which is less than `count` only for a smaller cluster.
pub fn mark_failed(cluster: &mut Cluster, count: usize) -> usize {
    let mut marked = 0;
    for acc in cluster.accelerators_mut().take(count) {
        acc.health_status = HealthStatus::Failed;
        acc.current_utilization = 0.;
        marked += 1;
    }
    marked
}

// INJECTOR ------------------------------------------------------------------------------------------------------------

const ID_SUFFIX_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Turns failure templates into active events ready to be injected.
///
/// Event ids get a random suffix from a seeded generator, so they are unique within a run
/// and reproducible across runs with the same seed. Ids never influence the simulation results.
pub struct FailureInjector {
    rand: Pcg64,
}

impl FailureInjector {
    pub fn new(seed: u64) -> Self {
        Self {
            rand: Pcg64::seed_from_u64(seed),
        }
    }

    fn id_suffix(&mut self) -> String {
        (0..ID_SUFFIX_LEN)
            .map(|_| ID_SUFFIX_CHARS[self.rand.gen_range(0..ID_SUFFIX_CHARS.len())] as char)
            .collect()
    }

    /// Creates an active copy of the template starting at the given time.
    pub fn instantiate(&mut self, template: &FailureEvent, time: NaiveDateTime) -> FailureEvent {
        let mut event = template.clone();
        event.id = format!("{}_{}_{}", template.id, time.format("%Y%m%d%H%M"), self.id_suffix());
        event.start_time = Some(time);
        event.is_active = true;
        event
    }

    /// Creates active events for all failures of the scenario with the given key.
    pub fn scenario_events(&mut self, key: &str, time: NaiveDateTime) -> Result<Vec<FailureEvent>, ConfigError> {
        let scenario = failure_scenario(key).ok_or_else(|| ConfigError::UnknownFailureScenario(key.to_string()))?;
        Ok(scenario
            .failures
            .iter()
            .map(|template| self.instantiate(template, time))
            .collect())
    }
}
