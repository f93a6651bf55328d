//! Electricity tariff and carbon accounting helpers.

use serde::{Deserialize, Serialize};

/// Time-of-use pricing schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouSchedule {
    /// Whether time-of-use pricing is applied.
    pub enabled: bool,
    /// Hours of day (0-23) billed at the peak rate.
    pub peak_hours: Vec<u32>,
    /// Rate multiplier during peak hours.
    pub peak_multiplier: f64,
    /// Rate multiplier outside of peak hours.
    pub offpeak_multiplier: f64,
}

impl TouSchedule {
    /// Creates a disabled schedule.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            peak_hours: Vec::new(),
            peak_multiplier: 1.,
            offpeak_multiplier: 1.,
        }
    }

    /// Returns the rate multiplier for the given hour of day.
    pub fn multiplier(&self, hour: u32) -> f64 {
        if !self.enabled {
            1.
        } else if self.peak_hours.contains(&hour) {
            self.peak_multiplier
        } else {
            self.offpeak_multiplier
        }
    }
}

impl Default for TouSchedule {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Returns carbon intensity (g/kWh) of a supply blending grid power with renewable PPA power.
///
/// * `renewable_fraction` - share of PPA power in 0.0-1.0 range.
pub fn blended_carbon_intensity(grid_intensity: f64, ppa_intensity: f64, renewable_fraction: f64) -> f64 {
    grid_intensity * (1. - renewable_fraction) + ppa_intensity * renewable_fraction
}

/// Returns emissions in kg for the given consumption in MWh and carbon intensity in g/kWh.
pub fn carbon_emissions(consumption_mwh: f64, intensity: f64) -> f64 {
    // MWh -> kWh and g -> kg cancel out
    consumption_mwh * 1000. * intensity / 1000.
}
