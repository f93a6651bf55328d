//! Economics layer: electricity cost, carbon emissions and cost of ownership.
//!
//! Costs are computed from the electricity supply mix when it is configured,
//! otherwise from the flat electricity rate and carbon accounting of the financial model.

use dcsim_models::tariff::{blended_carbon_intensity, carbon_emissions};

use crate::model::economics::{
    CarbonAccounting, ElectricityRate, ElectricitySource, ElectricitySourceType, FinancialModel,
};

pub const HOURS_PER_YEAR: f64 = 8760.;

/// Share of hours billed at the peak rate used to estimate the average time-of-use rate.
const PEAK_HOURS_SHARE: f64 = 0.3;

/// Returns cost in $ of the consumption supplied by the electricity mix.
///
/// The time-of-use multiplier applies only to grid sources.
pub fn hourly_cost_with_mix(consumption_kwh: f64, hour: u32, sources: &[ElectricitySource], rate: &ElectricityRate) -> f64 {
    sources
        .iter()
        .map(|source| {
            let mut cost = source.cost_per_kwh;
            if source.source_type == ElectricitySourceType::Grid {
                cost *= rate.tou.multiplier(hour);
            }
            consumption_kwh * (source.percentage / 100.) * cost
        })
        .sum()
}

/// Returns cost in $ of the consumption billed at the flat rate.
pub fn hourly_cost_flat(consumption_kwh: f64, hour: u32, rate: &ElectricityRate) -> f64 {
    consumption_kwh * (rate.energy_rate_per_kwh * rate.tou.multiplier(hour))
}

/// Returns emissions in kg of the consumption supplied by the electricity mix.
pub fn carbon_with_mix(consumption_mwh: f64, sources: &[ElectricitySource]) -> f64 {
    sources
        .iter()
        .map(|source| carbon_emissions(consumption_mwh * (source.percentage / 100.), source.carbon_intensity_g_per_kwh))
        .sum()
}

/// Returns emissions in kg for grid power blended with renewable PPA power.
pub fn carbon_flat(consumption_mwh: f64, carbon: &CarbonAccounting) -> f64 {
    let intensity = blended_carbon_intensity(
        carbon.grid_intensity_g_per_kwh,
        carbon.ppa_carbon_intensity,
        carbon.renewable_pct,
    );
    carbon_emissions(consumption_mwh, intensity)
}

/// Returns electricity cost in $ using the supply mix if it is configured.
pub fn hourly_cost(model: &FinancialModel, consumption_kwh: f64, hour: u32) -> f64 {
    if model.electricity_sources.is_empty() {
        hourly_cost_flat(consumption_kwh, hour, &model.electricity_rate)
    } else {
        hourly_cost_with_mix(consumption_kwh, hour, &model.electricity_sources, &model.electricity_rate)
    }
}

/// Returns emissions in kg using the supply mix if it is configured.
pub fn hourly_carbon(model: &FinancialModel, consumption_mwh: f64) -> f64 {
    if model.electricity_sources.is_empty() {
        carbon_flat(consumption_mwh, &model.carbon)
    } else {
        carbon_with_mix(consumption_mwh, &model.electricity_sources)
    }
}

pub fn total_capex(model: &FinancialModel) -> f64 {
    model.capex_items.iter().map(|item| item.amount_usd).sum()
}

/// Returns straight-line depreciation of all capex items per year.
pub fn annual_depreciation(model: &FinancialModel) -> f64 {
    model
        .capex_items
        .iter()
        .map(|item| item.amount_usd / item.useful_life_years)
        .sum()
}

/// Returns yearly electricity cost for the given average power.
///
/// With time-of-use pricing the rate is estimated assuming 30% of hours at the peak rate.
pub fn annual_electricity_cost(avg_power_kw: f64, hours_per_year: f64, rate: &ElectricityRate) -> f64 {
    let mut avg_rate = rate.energy_rate_per_kwh;
    if rate.tou.enabled {
        avg_rate *= rate.tou.peak_multiplier * PEAK_HOURS_SHARE + rate.tou.offpeak_multiplier * (1. - PEAK_HOURS_SHARE);
    }
    avg_power_kw * hours_per_year * avg_rate
}

/// Returns yearly operating costs: electricity, staff and maintenance.
pub fn annual_opex(model: &FinancialModel, annual_electricity_cost: f64) -> f64 {
    let staff = model.staff_count as f64 * model.staff_cost_per_fte;
    let maintenance = total_capex(model) * model.maintenance_pct_of_capex;
    annual_electricity_cost + staff + maintenance
}

/// Returns total cost of ownership over the given number of years.
pub fn total_cost_of_ownership(model: &FinancialModel, years: f64, avg_power_kw: f64) -> f64 {
    let electricity = annual_electricity_cost(avg_power_kw, HOURS_PER_YEAR, &model.electricity_rate);
    total_capex(model) + annual_opex(model, electricity) * years
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use dcsim_models::tariff::TouSchedule;

    use super::*;

    fn rate(tou_enabled: bool) -> ElectricityRate {
        ElectricityRate {
            energy_rate_per_kwh: 0.1,
            demand_rate_per_kw: 10.,
            tou: TouSchedule {
                enabled: tou_enabled,
                peak_hours: vec![14, 15, 16, 17, 18, 19],
                peak_multiplier: 1.5,
                offpeak_multiplier: 0.7,
            },
        }
    }

    fn source(source_type: ElectricitySourceType, percentage: f64, cost: f64, intensity: f64) -> ElectricitySource {
        ElectricitySource {
            source_type,
            name: format!("{:?}", source_type),
            percentage,
            cost_per_kwh: cost,
            carbon_intensity_g_per_kwh: intensity,
            is_renewable: source_type != ElectricitySourceType::Grid,
        }
    }

    #[test]
    fn test_mix_cost_applies_tou_to_grid_only() {
        let sources = vec![
            source(ElectricitySourceType::Grid, 50., 0.1, 400.),
            source(ElectricitySourceType::RenewablePpa, 50., 0.04, 0.),
        ];
        let peak = hourly_cost_with_mix(1000., 15, &sources, &rate(true));
        assert_abs_diff_eq!(peak, 500. * 0.1 * 1.5 + 500. * 0.04, epsilon = 1e-9);
        let offpeak = hourly_cost_with_mix(1000., 3, &sources, &rate(true));
        assert_abs_diff_eq!(offpeak, 500. * 0.1 * 0.7 + 500. * 0.04, epsilon = 1e-9);
        let disabled = hourly_cost_with_mix(1000., 15, &sources, &rate(false));
        assert_abs_diff_eq!(disabled, 500. * 0.1 + 500. * 0.04, epsilon = 1e-9);
    }

    #[test]
    fn test_mix_carbon() {
        let sources = vec![
            source(ElectricitySourceType::Grid, 80., 0.1, 350.),
            source(ElectricitySourceType::OnsiteWind, 20., 0.03, 0.),
        ];
        assert_abs_diff_eq!(carbon_with_mix(2., &sources), 2. * 0.8 * 350., epsilon = 1e-9);
    }

    #[test]
    fn test_flat_carbon() {
        let carbon = CarbonAccounting {
            grid_intensity_g_per_kwh: 400.,
            renewable_pct: 0.25,
            ppa_rate_per_mwh: 30.,
            ppa_carbon_intensity: 40.,
        };
        assert_abs_diff_eq!(carbon_flat(1., &carbon), 310., epsilon = 1e-9);
    }

    #[test]
    fn test_annual_electricity_cost() {
        assert_abs_diff_eq!(annual_electricity_cost(100., 1000., &rate(false)), 10000., epsilon = 1e-6);
        // 0.1 * (1.5 * 0.3 + 0.7 * 0.7) = 0.094
        assert_abs_diff_eq!(annual_electricity_cost(100., 1000., &rate(true)), 9400., epsilon = 1e-6);
    }
}
