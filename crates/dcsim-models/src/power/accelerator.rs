//! Accelerator power models.

/// Exponent used by the default accelerator power model.
///
/// GPU dynamic power grows faster than linearly with utilization, measured values are within 1.2-1.4.
pub const DEFAULT_POWER_EXPONENT: f64 = 1.3;

/// A model for estimating the power consumption of an accelerator (GPU) based on its utilization.
pub trait AcceleratorPowerModel {
    /// Returns accelerator power consumption in W.
    ///
    /// Utilization should be passed as a float in 0.0-1.0 range.
    fn get_power(&self, utilization: f64) -> f64;
}

/// A power model with polynomial growth of dynamic power:
/// `idle_power + (max_power - idle_power) * utilization ^ exponent`.
#[derive(Clone, Debug)]
pub struct PolynomialAcceleratorPowerModel {
    idle_power: f64,
    factor: f64,
    exponent: f64,
}

impl PolynomialAcceleratorPowerModel {
    /// Creates a polynomial power model.
    ///
    /// * `idle_power` - The power consumption in W at 0% utilization.
    /// * `max_power` - The power consumption in W at 100% utilization (TDP).
    /// * `exponent` - The exponent of the dynamic power curve.
    pub fn new(idle_power: f64, max_power: f64, exponent: f64) -> Self {
        Self {
            idle_power,
            factor: max_power - idle_power,
            exponent,
        }
    }

    /// Creates a model using [`DEFAULT_POWER_EXPONENT`].
    pub fn with_default_exponent(idle_power: f64, max_power: f64) -> Self {
        Self::new(idle_power, max_power, DEFAULT_POWER_EXPONENT)
    }
}

impl AcceleratorPowerModel for PolynomialAcceleratorPowerModel {
    fn get_power(&self, utilization: f64) -> f64 {
        self.idle_power + self.factor * utilization.powf(self.exponent)
    }
}
