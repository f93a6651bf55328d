//! Thermal layer: cooling power and zone metrics.

use dcsim_models::thermal;

use crate::model::thermal::{Chiller, ChillerStatus, CoolingSystem, WeatherConditions};

pub fn chiller_cop(chiller: &Chiller, ambient_temp: f64) -> f64 {
    thermal::chiller_cop(&chiller.cop_curve, ambient_temp)
}

/// Returns chiller power in kW for the heat load assigned to the chiller.
pub fn chiller_power(chiller: &Chiller, cooling_load: f64, ambient_temp: f64) -> f64 {
    thermal::chiller_power(&chiller.cop_curve, cooling_load, chiller.current_load_pct, ambient_temp)
}

/// Checks whether the economizer is enabled and the weather allows free cooling.
pub fn economizer_engaged(system: &CoolingSystem, weather: &WeatherConditions) -> bool {
    system.economizer_enabled && thermal::free_cooling_available(weather.wet_bulb_temp_c, system.economizer_setpoint_c)
}

/// Returns power in kW needed to remove the given heat load.
///
/// With free cooling only pumps and fans are running. Otherwise the heat load is split evenly
/// between the running chillers, and cooling tower and CRAH power is added.
pub fn cooling_power(system: &CoolingSystem, heat_load: f64, weather: &WeatherConditions) -> f64 {
    if economizer_engaged(system, weather) {
        return thermal::free_cooling_power(heat_load);
    }
    let running = system
        .chillers
        .iter()
        .filter(|chiller| chiller.status == ChillerStatus::Running)
        .collect::<Vec<_>>();
    let mut power = 0.;
    if !running.is_empty() {
        let chiller_load = heat_load / running.len() as f64;
        power += running
            .iter()
            .map(|chiller| chiller_power(chiller, chiller_load, weather.dry_bulb_temp_c))
            .sum::<f64>();
    }
    power += system
        .cooling_towers
        .iter()
        .map(|tower| tower.fan_power_kw + tower.pump_power_kw)
        .sum::<f64>();
    power += system.crah_units.iter().map(|crah| crah.fan_power_kw).sum::<f64>();
    power
}

/// Returns average temperature over the thermal zones, 0 if there are no zones.
pub fn average_zone_temperature(system: &CoolingSystem) -> f64 {
    if system.zones.is_empty() {
        return 0.;
    }
    system.zones.iter().map(|zone| zone.current_temp_c).sum::<f64>() / system.zones.len() as f64
}

/// Returns heat load as a percentage of the total chiller capacity, 0 without chillers.
pub fn cooling_capacity_used_pct(system: &CoolingSystem, heat_load: f64) -> f64 {
    let capacity = system.chillers.iter().map(|chiller| chiller.capacity_kw).sum::<f64>();
    if capacity > 0. {
        heat_load / capacity * 100.
    } else {
        0.
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::data::curves::chiller_cop_curve;
    use crate::model::thermal::{ChillerType, CoolingTower, CoolingType, TowerType};

    fn chiller(id: &str, status: ChillerStatus, load_pct: f64) -> Chiller {
        Chiller {
            id: id.to_string(),
            chiller_type: ChillerType::WaterCooled,
            capacity_kw: 1000.,
            current_load_pct: load_pct,
            status,
            chw_supply_temp_c: 7.,
            chw_return_temp_c: 12.,
            cop_curve: chiller_cop_curve(),
        }
    }

    fn system() -> CoolingSystem {
        CoolingSystem {
            cooling_type: CoolingType::D2c,
            chillers: vec![
                chiller("chiller-1", ChillerStatus::Running, 0.5),
                chiller("chiller-2", ChillerStatus::Running, 0.5),
                chiller("chiller-3", ChillerStatus::Standby, 0.),
            ],
            cooling_towers: vec![CoolingTower {
                id: "tower-1".to_string(),
                tower_type: TowerType::Wet,
                capacity_kw: 2000.,
                fan_power_kw: 50.,
                pump_power_kw: 75.,
                water_consumption_l_per_kwh: 1.8,
                approach_temp_c: 5.,
                range_temp_c: 10.,
            }],
            crah_units: Vec::new(),
            cdus: Vec::new(),
            zones: Vec::new(),
            economizer_enabled: true,
            economizer_setpoint_c: 15.,
        }
    }

    fn weather(dry_bulb: f64, wet_bulb: f64) -> WeatherConditions {
        WeatherConditions {
            dry_bulb_temp_c: dry_bulb,
            wet_bulb_temp_c: wet_bulb,
            humidity_pct: 50.,
        }
    }

    #[test]
    fn test_free_cooling() {
        let system = system();
        assert!(economizer_engaged(&system, &weather(10., 5.)));
        assert_eq!(cooling_power(&system, 1000., &weather(10., 5.)), 1000. * 0.02);
    }

    #[test]
    fn test_mechanical_cooling() {
        let system = system();
        assert!(!economizer_engaged(&system, &weather(25., 10.)));
        // 500 kW per running chiller at half load, COP 6 at 25 °C, plus tower fan and pump
        let expected = 2. * (500. * 0.5 / 6.) + 125.;
        assert_abs_diff_eq!(cooling_power(&system, 1000., &weather(25., 10.)), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_disabled_economizer() {
        let mut system = system();
        system.economizer_enabled = false;
        assert!(!economizer_engaged(&system, &weather(0., -5.)));
    }

    #[test]
    fn test_capacity_used() {
        let mut system = system();
        assert_abs_diff_eq!(cooling_capacity_used_pct(&system, 1500.), 50., epsilon = 1e-9);
        assert_eq!(average_zone_temperature(&system), 0.);
        system.chillers.clear();
        assert_eq!(cooling_capacity_used_pct(&system, 1500.), 0.);
        // only the tower is left
        assert_eq!(cooling_power(&system, 1500., &weather(25., 20.)), 125.);
    }
}
