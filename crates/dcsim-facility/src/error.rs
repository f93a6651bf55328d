//! Configuration errors.

use thiserror::Error;

/// Error raised when a scenario can't be turned into a facility state.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Location key is not present in the location presets.
    #[error("unknown location `{0}`")]
    UnknownLocation(String),
    /// Accelerator type key is not present in the accelerator specs.
    #[error("unknown accelerator type `{0}`")]
    UnknownAccelerator(String),
    /// Weather profile key is not present in the weather profiles.
    #[error("unknown weather profile `{0}`")]
    UnknownWeatherProfile(String),
    /// Workload profile key is not present in the workload patterns.
    #[error("unknown workload profile `{0}`")]
    UnknownWorkloadProfile(String),
    /// Electricity profile key is not present in the electricity price profiles.
    #[error("unknown electricity profile `{0}`")]
    UnknownElectricityProfile(String),
    /// Failure scenario key is not present in the failure catalog.
    #[error("unknown failure scenario `{0}`")]
    UnknownFailureScenario(String),
    /// Facility should contain at least one accelerator.
    #[error("accelerator count should be positive")]
    InvalidAcceleratorCount,
    /// Target utilization should be within `[0, 1]`.
    #[error("target utilization {0} is outside of [0, 1]")]
    InvalidTargetUtilization(f64),
    /// Scenario file can't be read.
    #[error("can't read scenario file {path}: {source}")]
    Io {
        /// Path to the scenario file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Scenario file is not a valid YAML scenario.
    #[error("can't parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
}
