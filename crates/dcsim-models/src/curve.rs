//! Piecewise-linear calibration curves.

use serde::{Deserialize, Serialize};

/// Curve defined by a list of `(x, y)` control points with strictly ascending `x`.
///
/// Values between control points are linearly interpolated, values outside of the covered range
/// are clamped to the first or the last point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct Curve {
    points: Vec<(f64, f64)>,
}

impl Curve {
    /// Creates a curve from control points.
    ///
    /// Panics if the list is empty or `x` values are not strictly ascending.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        if let Err(msg) = check_points(&points) {
            panic!("Incorrect curve points: {}", msg);
        }
        Self { points }
    }

    /// Creates a curve by copying control points from a slice.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self::new(points.to_vec())
    }

    /// Returns the control points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Returns the curve value at `x`.
    pub fn value(&self, x: f64) -> f64 {
        interpolate(&self.points, x)
    }
}

impl TryFrom<Vec<(f64, f64)>> for Curve {
    type Error = String;

    fn try_from(points: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        check_points(&points)?;
        Ok(Self { points })
    }
}

impl From<Curve> for Vec<(f64, f64)> {
    fn from(curve: Curve) -> Self {
        curve.points
    }
}

fn check_points(points: &[(f64, f64)]) -> Result<(), String> {
    if points.is_empty() {
        return Err("curve should have at least one point".to_string());
    }
    for pair in points.windows(2) {
        if pair[0].0.partial_cmp(&pair[1].0) != Some(std::cmp::Ordering::Less) {
            return Err(format!("x values should be strictly ascending, got {} before {}", pair[0].0, pair[1].0));
        }
    }
    Ok(())
}

/// Linear interpolation over ascending control points.
///
/// Returns the first `y` for `x` at or below the minimum and the last `y` for `x` at or above the maximum.
/// Panics on an empty list of points.
pub fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    assert!(!points.is_empty(), "Can't interpolate over an empty curve");
    let (x_first, y_first) = points[0];
    let (x_last, y_last) = points[points.len() - 1];
    if x <= x_first {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }
    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        if x >= x1 && x <= x2 {
            let t = (x - x1) / (x2 - x1);
            return y1 + t * (y2 - y1);
        }
    }
    y_last
}
