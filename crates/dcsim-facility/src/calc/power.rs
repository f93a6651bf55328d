//! Power layer: distribution losses of transformers, UPS units and PDUs.

use dcsim_models::power::distribution;

use crate::model::power::{Pdu, PowerPath, PowerSystem, Transformer, Ups};

pub fn ups_efficiency(ups: &Ups) -> f64 {
    distribution::ups_efficiency(&ups.efficiency_curve, ups.current_load_kw, ups.capacity_kva)
}

/// Returns UPS conversion loss in kW.
pub fn ups_loss(ups: &Ups) -> f64 {
    distribution::ups_loss(&ups.efficiency_curve, ups.current_load_kw, ups.capacity_kva)
}

/// Returns transformer loss in kW.
pub fn transformer_loss(transformer: &Transformer) -> f64 {
    distribution::transformer_loss(
        transformer.current_load_kw,
        transformer.capacity_kva,
        transformer.no_load_loss_kw,
        transformer.full_load_loss_kw,
    )
}

pub fn transformer_efficiency(transformer: &Transformer) -> f64 {
    distribution::transformer_efficiency(
        transformer.current_load_kw,
        transformer.capacity_kva,
        transformer.no_load_loss_kw,
        transformer.full_load_loss_kw,
    )
}

/// Returns PDU loss in kW.
pub fn pdu_loss(pdu: &Pdu) -> f64 {
    distribution::pdu_loss(pdu.current_load_kw, pdu.efficiency)
}

/// Returns losses of all units of the power path in kW.
pub fn path_losses(path: &PowerPath) -> f64 {
    path.transformers.iter().map(transformer_loss).sum::<f64>()
        + path.ups_units.iter().map(ups_loss).sum::<f64>()
        + path.pdus.iter().map(pdu_loss).sum::<f64>()
}

/// Returns distribution losses of the whole power system in kW.
///
/// Losses are computed from the load values stored in the units.
pub fn total_distribution_losses(system: &PowerSystem) -> f64 {
    system.paths.values().map(path_losses).sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use indexmap::IndexMap;

    use super::*;
    use crate::data::curves::ups_efficiency_curve;
    use crate::model::power::{RedundancyMode, UpsMode};

    fn path(load: f64) -> PowerPath {
        PowerPath {
            id: "A".to_string(),
            sources: Vec::new(),
            transformers: vec![Transformer {
                id: "xfmr-a".to_string(),
                capacity_kva: 2. * load,
                voltage_primary: 13800.,
                voltage_secondary: 480.,
                current_load_kw: load,
                no_load_loss_kw: 5.,
                full_load_loss_kw: 15.,
            }],
            ups_units: vec![Ups {
                id: "ups-a".to_string(),
                capacity_kva: 2. * load,
                current_load_kw: load,
                mode: UpsMode::Online,
                redundancy_group: "A".to_string(),
                is_healthy: true,
                battery_runtime_minutes: 15.,
                battery_health_pct: 100.,
                efficiency_curve: ups_efficiency_curve(),
            }],
            pdus: vec![Pdu {
                id: "pdu-a".to_string(),
                capacity_kw: 2. * load,
                voltage_in: 480.,
                voltage_out: 208.,
                current_load_kw: load,
                efficiency: 0.985,
                redundancy_group: "A".to_string(),
            }],
        }
    }

    #[test]
    fn test_path_losses() {
        let path = path(1000.);
        assert_abs_diff_eq!(ups_efficiency(&path.ups_units[0]), 0.955, epsilon = 1e-12);
        assert_abs_diff_eq!(transformer_loss(&path.transformers[0]), 8.75, epsilon = 1e-9);
        assert_abs_diff_eq!(pdu_loss(&path.pdus[0]), 15., epsilon = 1e-9);
        let ups = 1000. * (1. / 0.955 - 1.);
        assert_abs_diff_eq!(path_losses(&path), 8.75 + ups + 15., epsilon = 1e-6);
    }

    #[test]
    fn test_total_losses() {
        let mut paths = IndexMap::new();
        paths.insert("A".to_string(), path(1000.));
        paths.insert("B".to_string(), path(1000.));
        let system = PowerSystem {
            paths,
            redundancy_mode: RedundancyMode::TwoN,
        };
        assert_abs_diff_eq!(
            total_distribution_losses(&system),
            2. * path_losses(&path(1000.)),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_unloaded_transformer() {
        let mut path = path(1000.);
        path.transformers[0].current_load_kw = 0.;
        assert_eq!(transformer_efficiency(&path.transformers[0]), 0.);
        assert_eq!(transformer_loss(&path.transformers[0]), 5.);
    }
}
