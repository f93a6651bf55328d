//! Scenario parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::economics::{ElectricitySource, OptimizationTarget};
use crate::model::power::RedundancyMode;
use crate::model::thermal::CoolingType;

/// Holds raw scenario parameters parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawScenarioParams {
    pub location: Option<String>,
    pub accelerator_type: Option<String>,
    pub accelerator_count: Option<u32>,
    pub target_utilization: Option<f64>,
    pub ambient_temp_c: Option<f64>,
    pub wet_bulb_temp_c: Option<f64>,
    pub redundancy_mode: Option<RedundancyMode>,
    pub cooling_type: Option<CoolingType>,
    pub economizer_enabled: Option<bool>,
    pub weather_profile: Option<String>,
    pub workload_profile: Option<String>,
    pub electricity_profile: Option<String>,
    pub electricity_sources: Option<Vec<ElectricitySource>>,
    pub optimization_target: Option<OptimizationTarget>,
}

/// Parameters of a facility scenario.
///
/// Location, accelerator type and profile keys refer to the tables in [`crate::data`],
/// unknown keys are rejected when the facility is assembled.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ScenarioParams {
    /// Location preset key, e.g. `iowa`.
    pub location: String,
    /// Accelerator type key, e.g. `H100_SXM`.
    pub accelerator_type: String,
    /// Number of accelerators, should be positive.
    pub accelerator_count: u32,
    /// Target accelerator utilization in 0.0-1.0 range.
    pub target_utilization: f64,
    /// Ambient (dry-bulb) temperature in °C used when no weather profile is set.
    pub ambient_temp_c: f64,
    /// Wet-bulb temperature in °C used when no weather profile is set.
    pub wet_bulb_temp_c: f64,
    /// Power redundancy, N+1 by default.
    pub redundancy_mode: Option<RedundancyMode>,
    /// Cooling technology, direct-to-chip by default.
    pub cooling_type: Option<CoolingType>,
    /// Whether the economizer can be used, enabled by default.
    pub economizer_enabled: Option<bool>,
    pub weather_profile: Option<String>,
    pub workload_profile: Option<String>,
    pub electricity_profile: Option<String>,
    /// Electricity supply mix, 80% grid + 20% wind PPA by default.
    pub electricity_sources: Option<Vec<ElectricitySource>>,
    /// Balanced by default.
    pub optimization_target: Option<OptimizationTarget>,
}

impl ScenarioParams {
    /// Creates parameters with the required values set and all optional values left at defaults.
    pub fn new(
        location: &str,
        accelerator_type: &str,
        accelerator_count: u32,
        target_utilization: f64,
        ambient_temp_c: f64,
        wet_bulb_temp_c: f64,
    ) -> Self {
        Self {
            location: location.to_string(),
            accelerator_type: accelerator_type.to_string(),
            accelerator_count,
            target_utilization,
            ambient_temp_c,
            wet_bulb_temp_c,
            redundancy_mode: None,
            cooling_type: None,
            economizer_enabled: None,
            weather_profile: None,
            workload_profile: None,
            electricity_profile: None,
            electricity_sources: None,
            optimization_target: None,
        }
    }

    /// Parses parameters from YAML string (uses baseline values if some parameters are absent).
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawScenarioParams = serde_yaml::from_str(yaml)?;
        let baseline = Self::default();
        Ok(Self {
            location: raw.location.unwrap_or(baseline.location),
            accelerator_type: raw.accelerator_type.unwrap_or(baseline.accelerator_type),
            accelerator_count: raw.accelerator_count.unwrap_or(baseline.accelerator_count),
            target_utilization: raw.target_utilization.unwrap_or(baseline.target_utilization),
            ambient_temp_c: raw.ambient_temp_c.unwrap_or(baseline.ambient_temp_c),
            wet_bulb_temp_c: raw.wet_bulb_temp_c.unwrap_or(baseline.wet_bulb_temp_c),
            redundancy_mode: raw.redundancy_mode,
            cooling_type: raw.cooling_type,
            economizer_enabled: raw.economizer_enabled,
            weather_profile: raw.weather_profile,
            workload_profile: raw.workload_profile,
            electricity_profile: raw.electricity_profile,
            electricity_sources: raw.electricity_sources,
            optimization_target: raw.optimization_target,
        })
    }

    /// Reads parameters from YAML file.
    pub fn from_file(file_name: &str) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(file_name).map_err(|source| ConfigError::Io {
            path: file_name.to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }
}

impl Default for ScenarioParams {
    /// Baseline scenario: 8,000 H100 accelerators in Iowa at 85% utilization.
    fn default() -> Self {
        Self::new("iowa", "H100_SXM", 8000, 0.85, 25., 18.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_with_defaults() {
        let params = ScenarioParams::from_yaml(
            "location: sweden\naccelerator_count: 64\nweather_profile: cool_day\nredundancy_mode: 2n\n",
        )
        .unwrap();
        assert_eq!(params.location, "sweden");
        assert_eq!(params.accelerator_type, "H100_SXM");
        assert_eq!(params.accelerator_count, 64);
        assert_eq!(params.target_utilization, 0.85);
        assert_eq!(params.weather_profile.as_deref(), Some("cool_day"));
        assert_eq!(params.redundancy_mode, Some(RedundancyMode::TwoN));
        assert_eq!(params.cooling_type, None);
    }

    #[test]
    fn test_from_yaml_with_sources() {
        let params = ScenarioParams::from_yaml(
            r#"
location: texas
electricity_sources:
  - source_type: grid
    name: Grid
    percentage: 60
    cost_per_kwh: 0.05
    carbon_intensity_g_per_kwh: 380
    is_renewable: false
  - source_type: onsite_solar
    name: Solar
    percentage: 40
    cost_per_kwh: 0.02
    carbon_intensity_g_per_kwh: 0
    is_renewable: true
optimization_target: carbon
"#,
        )
        .unwrap();
        let sources = params.electricity_sources.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].percentage, 40.);
        assert_eq!(params.optimization_target, Some(OptimizationTarget::Carbon));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            ScenarioParams::from_yaml("accelerator_count: many"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ScenarioParams::from_file("no-such-scenario.yaml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
