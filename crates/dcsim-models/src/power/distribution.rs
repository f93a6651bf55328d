//! Loss models of power distribution equipment.
//!
//! All loads are in kW, capacities in kVA (treated as kW at unity power factor).
//! An equipment unit with zero capacity is treated as unloaded.

use crate::curve::Curve;

fn load_fraction(load: f64, capacity: f64) -> f64 {
    if capacity > 0. {
        load / capacity
    } else {
        0.
    }
}

/// Returns UPS efficiency at the given load using its efficiency-vs-load-fraction curve.
pub fn ups_efficiency(efficiency_curve: &Curve, load: f64, capacity: f64) -> f64 {
    efficiency_curve.value(load_fraction(load, capacity))
}

/// Returns UPS conversion loss: `load * (1 / efficiency - 1)`.
///
/// Zero efficiency yields zero loss.
pub fn ups_loss(efficiency_curve: &Curve, load: f64, capacity: f64) -> f64 {
    let efficiency = ups_efficiency(efficiency_curve, load, capacity);
    if efficiency == 0. {
        return 0.;
    }
    load * (1. / efficiency - 1.)
}

/// Returns transformer loss: `no_load_loss + (load / capacity)^2 * full_load_loss`.
pub fn transformer_loss(load: f64, capacity: f64, no_load_loss: f64, full_load_loss: f64) -> f64 {
    let fraction = load_fraction(load, capacity);
    no_load_loss + fraction.powi(2) * full_load_loss
}

/// Returns transformer efficiency, zero for an unloaded transformer.
pub fn transformer_efficiency(load: f64, capacity: f64, no_load_loss: f64, full_load_loss: f64) -> f64 {
    if load == 0. {
        return 0.;
    }
    let loss = transformer_loss(load, capacity, no_load_loss, full_load_loss);
    load / (load + loss)
}

/// Returns PDU loss for a constant efficiency.
pub fn pdu_loss(load: f64, efficiency: f64) -> f64 {
    load * (1. - efficiency)
}
