//! Infrastructure failure events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    UpsTrip,
    ChillerFailure,
    PduFailure,
    GpuRackFailure,
    CoolingTowerFailure,
    GeneratorStartFail,
}

/// Failure event injected into the facility.
///
/// An active event stays in the state until its remaining duration runs out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureEvent {
    pub id: String,
    pub failure_type: FailureType,
    pub name: String,
    pub description: String,
    pub start_time: Option<NaiveDateTime>,
    /// Remaining duration in hours.
    pub duration_hours: f64,
    pub is_active: bool,
    #[serde(default)]
    pub impacted_component_ids: Vec<String>,
    /// Share of accelerators taken offline, in 0-100 range.
    pub capacity_reduction_pct: Option<f64>,
    /// Loss of cooling efficiency, in 0-100 range.
    pub performance_degradation_pct: Option<f64>,
}

/// Named group of failure events injected together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureScenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub failures: Vec<FailureEvent>,
}
