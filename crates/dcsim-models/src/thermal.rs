//! Cooling models.

use crate::curve::Curve;

/// Minimum difference in °C between the economizer setpoint and the wet-bulb temperature
/// required to use free cooling.
pub const ECONOMIZER_APPROACH: f64 = 5.;

/// Fraction of the heat load spent on pumps and fans when free cooling is used.
pub const FREE_COOLING_POWER_FRACTION: f64 = 0.02;

/// Checks whether free cooling can be used. The comparison is strict.
pub fn free_cooling_available(wet_bulb_temp: f64, setpoint: f64) -> bool {
    wet_bulb_temp < setpoint - ECONOMIZER_APPROACH
}

/// Returns cooling power in kW spent to remove the given heat load with free cooling.
pub fn free_cooling_power(heat_load: f64) -> f64 {
    heat_load * FREE_COOLING_POWER_FRACTION
}

/// Returns chiller COP at the given ambient temperature.
pub fn chiller_cop(cop_curve: &Curve, ambient_temp: f64) -> f64 {
    cop_curve.value(ambient_temp)
}

/// Returns electrical power in kW consumed by a chiller.
///
/// * `cooling_load` - heat load in kW assigned to the chiller.
/// * `load_fraction` - fraction of the assigned load actually handled by the chiller.
/// * `ambient_temp` - ambient (dry-bulb) temperature in °C.
///
/// Zero COP yields zero power.
pub fn chiller_power(cop_curve: &Curve, cooling_load: f64, load_fraction: f64, ambient_temp: f64) -> f64 {
    let cop = chiller_cop(cop_curve, ambient_temp);
    if cop == 0. {
        return 0.;
    }
    cooling_load * load_fraction / cop
}

/// Power usage effectiveness: total facility power divided by IT power.
///
/// Equals 1 when there is no IT load.
pub fn pue(it_power: f64, cooling_power: f64, distribution_losses: f64) -> f64 {
    if it_power == 0. {
        return 1.;
    }
    (it_power + cooling_power + distribution_losses) / it_power
}

/// PUE taking into account only the power distribution losses.
pub fn distribution_pue(it_power: f64, distribution_losses: f64) -> f64 {
    pue(it_power, 0., distribution_losses)
}
