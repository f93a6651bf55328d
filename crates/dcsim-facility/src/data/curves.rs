//! Default equipment calibration curves.

use dcsim_models::curve::Curve;

/// Efficiency of a double-conversion UPS by load fraction.
pub const UPS_EFFICIENCY_POINTS: [(f64, f64); 10] = [
    (0.10, 0.85),
    (0.20, 0.90),
    (0.30, 0.93),
    (0.40, 0.945),
    (0.50, 0.955),
    (0.60, 0.96),
    (0.70, 0.962),
    (0.80, 0.96),
    (0.90, 0.955),
    (1.00, 0.95),
];

/// COP of a water-cooled chiller by ambient temperature in °C.
pub const CHILLER_COP_POINTS: [(f64, f64); 7] = [
    (15., 7.0),
    (20., 6.5),
    (25., 6.0),
    (30., 5.5),
    (35., 5.0),
    (40., 4.5),
    (45., 4.0),
];

pub fn ups_efficiency_curve() -> Curve {
    Curve::from_points(&UPS_EFFICIENCY_POINTS)
}

pub fn chiller_cop_curve() -> Curve {
    Curve::from_points(&CHILLER_COP_POINTS)
}
