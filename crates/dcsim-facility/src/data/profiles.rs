//! Hour-of-day profiles of weather, workload and electricity price.
//!
//! Each profile holds 24 hourly values, lookups wrap the hour modulo 24.

use crate::model::thermal::WeatherConditions;

pub const HOURS_PER_DAY: usize = 24;

fn hour_index(hour: u32) -> usize {
    hour as usize % HOURS_PER_DAY
}

// WEATHER -------------------------------------------------------------------------------------------------------------

pub struct WeatherProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub temperature_by_hour: [f64; HOURS_PER_DAY],
    pub wet_bulb_by_hour: [f64; HOURS_PER_DAY],
    pub humidity_by_hour: [f64; HOURS_PER_DAY],
}

impl WeatherProfile {
    pub fn at_hour(&self, hour: u32) -> WeatherConditions {
        let h = hour_index(hour);
        WeatherConditions {
            dry_bulb_temp_c: self.temperature_by_hour[h],
            wet_bulb_temp_c: self.wet_bulb_by_hour[h],
            humidity_pct: self.humidity_by_hour[h],
        }
    }
}

static TYPICAL_SUMMER: WeatherProfile = WeatherProfile {
    name: "Typical Summer Day",
    description: "Hot afternoon, cool morning/evening",
    temperature_by_hour: [
        18., 17., 16., 16., 17., 18., 20., 22., 25., 28., 31., 33., 35., 36., 36., 35., 33., 30., 27., 24., 22., 21.,
        20., 19.,
    ],
    wet_bulb_by_hour: [
        14., 13., 13., 13., 14., 15., 16., 17., 19., 21., 23., 24., 25., 26., 26., 25., 24., 22., 20., 18., 17., 16.,
        15., 14.,
    ],
    humidity_by_hour: [
        70., 72., 75., 75., 72., 70., 65., 60., 55., 50., 45., 42., 40., 38., 38., 40., 42., 45., 50., 55., 60., 65.,
        68., 70.,
    ],
};

static HOT_DAY: WeatherProfile = WeatherProfile {
    name: "Extreme Heat Day",
    description: "Sustained high temperatures",
    temperature_by_hour: [
        28., 27., 26., 26., 27., 29., 32., 35., 38., 40., 42., 43., 44., 44., 43., 42., 40., 38., 35., 33., 32., 31.,
        30., 29.,
    ],
    wet_bulb_by_hour: [
        22., 21., 21., 21., 22., 23., 25., 26., 28., 29., 30., 31., 31., 31., 30., 29., 28., 27., 25., 24., 23., 23.,
        22., 22.,
    ],
    humidity_by_hour: [
        60., 62., 65., 65., 62., 60., 55., 50., 45., 42., 40., 38., 37., 37., 38., 40., 42., 45., 48., 52., 55., 57.,
        58., 60.,
    ],
};

static COOL_DAY: WeatherProfile = WeatherProfile {
    name: "Cool Day (Ideal for Free Cooling)",
    description: "Low temperatures, great for economizer",
    temperature_by_hour: [
        8., 7., 6., 6., 7., 8., 10., 12., 14., 16., 18., 20., 21., 22., 22., 21., 19., 17., 15., 13., 12., 11., 10.,
        9.,
    ],
    wet_bulb_by_hour: [
        6., 5., 5., 5., 6., 7., 8., 9., 11., 12., 13., 14., 15., 15., 15., 14., 13., 12., 11., 10., 9., 8., 7., 7.,
    ],
    humidity_by_hour: [
        75., 78., 80., 80., 78., 75., 70., 65., 60., 55., 50., 48., 45., 45., 45., 48., 52., 58., 62., 68., 72., 75.,
        76., 75.,
    ],
};

static STATIC_BASELINE: WeatherProfile = WeatherProfile {
    name: "Static Baseline (No Variation)",
    description: "Constant temperature for testing",
    temperature_by_hour: [25.; HOURS_PER_DAY],
    wet_bulb_by_hour: [18.; HOURS_PER_DAY],
    humidity_by_hour: [50.; HOURS_PER_DAY],
};

pub fn weather_profile(key: &str) -> Option<&'static WeatherProfile> {
    match key {
        "typical_summer" => Some(&TYPICAL_SUMMER),
        "hot_day" => Some(&HOT_DAY),
        "cool_day" => Some(&COOL_DAY),
        "static_baseline" => Some(&STATIC_BASELINE),
        _ => None,
    }
}

// WORKLOAD ------------------------------------------------------------------------------------------------------------

/// Accelerator utilization pattern: base utilization scaled by an hourly multiplier.
pub struct WorkloadPattern {
    pub name: &'static str,
    pub description: &'static str,
    pub base_utilization: f64,
    pub hourly_multiplier: [f64; HOURS_PER_DAY],
}

impl WorkloadPattern {
    /// Returns target utilization at the given hour, clamped to `[0, 1]`.
    pub fn utilization_at_hour(&self, hour: u32) -> f64 {
        (self.base_utilization * self.hourly_multiplier[hour_index(hour)]).clamp(0., 1.)
    }
}

static CONSTANT: WorkloadPattern = WorkloadPattern {
    name: "Constant Load",
    description: "Steady 85% utilization",
    base_utilization: 0.85,
    hourly_multiplier: [1.; HOURS_PER_DAY],
};

static BUSINESS_HOURS: WorkloadPattern = WorkloadPattern {
    name: "Business Hours Pattern",
    description: "Peak during work hours, low at night",
    base_utilization: 0.85,
    hourly_multiplier: [
        0.3, 0.2, 0.2, 0.2, 0.2, 0.3, 0.5, 0.7, 0.9, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4,
        0.3, 0.3,
    ],
};

static BATCH_TRAINING: WorkloadPattern = WorkloadPattern {
    name: "Batch Training Jobs",
    description: "Spiky pattern with batch job submissions",
    base_utilization: 0.80,
    hourly_multiplier: [
        0.5, 0.5, 0.5, 0.5, 0.5, 0.6, 0.7, 0.8, 1.1, 1.2, 0.9, 0.8, 1.0, 1.3, 1.2, 0.9, 0.8, 1.1, 1.2, 1.0, 0.8, 0.7,
        0.6, 0.5,
    ],
};

static INFERENCE_HEAVY: WorkloadPattern = WorkloadPattern {
    name: "Inference Workload",
    description: "Lower base, peaks during user activity",
    base_utilization: 0.60,
    hourly_multiplier: [
        0.4, 0.3, 0.3, 0.3, 0.4, 0.5, 0.7, 0.9, 1.1, 1.3, 1.4, 1.4, 1.5, 1.5, 1.4, 1.3, 1.2, 1.1, 1.0, 0.9, 0.8, 0.7,
        0.6, 0.5,
    ],
};

static WEEKEND_LIGHT: WorkloadPattern = WorkloadPattern {
    name: "Weekend/Light Load",
    description: "Reduced utilization overall",
    base_utilization: 0.50,
    hourly_multiplier: [
        0.6, 0.5, 0.5, 0.5, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.0, 1.0, 1.0, 1.0, 0.9, 0.9, 0.8, 0.8, 0.7, 0.7, 0.7, 0.7,
        0.6, 0.6,
    ],
};

pub fn workload_pattern(key: &str) -> Option<&'static WorkloadPattern> {
    match key {
        "constant" => Some(&CONSTANT),
        "business_hours" => Some(&BUSINESS_HOURS),
        "batch_training" => Some(&BATCH_TRAINING),
        "inference_heavy" => Some(&INFERENCE_HEAVY),
        "weekend_light" => Some(&WEEKEND_LIGHT),
        _ => None,
    }
}

// ELECTRICITY ---------------------------------------------------------------------------------------------------------

/// Electricity price pattern: base price scaled by an hourly multiplier.
pub struct ElectricityPriceProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub base_price_per_kwh: f64,
    pub hourly_multiplier: [f64; HOURS_PER_DAY],
}

impl ElectricityPriceProfile {
    pub fn price_at_hour(&self, hour: u32) -> f64 {
        self.base_price_per_kwh * self.hourly_multiplier[hour_index(hour)]
    }
}

static FLAT_RATE: ElectricityPriceProfile = ElectricityPriceProfile {
    name: "Flat Rate",
    description: "No time-of-use variation",
    base_price_per_kwh: 0.055,
    hourly_multiplier: [1.; HOURS_PER_DAY],
};

static TOU_STANDARD: ElectricityPriceProfile = ElectricityPriceProfile {
    name: "Standard Time-of-Use",
    description: "Higher rates 2pm-8pm weekdays",
    base_price_per_kwh: 0.055,
    hourly_multiplier: [
        0.7, 0.7, 0.7, 0.7, 0.7, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.6, 1.5, 1.5, 1.4, 1.3, 1.0, 0.9,
        0.8, 0.7,
    ],
};

static TOU_EXTREME: ElectricityPriceProfile = ElectricityPriceProfile {
    name: "Extreme Peak Pricing",
    description: "Very high peak rates (like ERCOT during heat)",
    base_price_per_kwh: 0.05,
    hourly_multiplier: [
        0.5, 0.5, 0.5, 0.5, 0.5, 0.6, 0.7, 0.9, 1.2, 1.5, 1.8, 2.0, 2.5, 3.0, 3.0, 2.8, 2.5, 2.0, 1.5, 1.2, 1.0, 0.8,
        0.6, 0.5,
    ],
};

static RENEWABLE_HEAVY: ElectricityPriceProfile = ElectricityPriceProfile {
    name: "Renewable-Heavy Grid",
    description: "Cheap during solar hours, expensive at night",
    base_price_per_kwh: 0.04,
    hourly_multiplier: [
        1.5, 1.6, 1.6, 1.5, 1.4, 1.3, 1.1, 0.9, 0.7, 0.5, 0.4, 0.3, 0.3, 0.4, 0.5, 0.6, 0.8, 1.0, 1.2, 1.4, 1.5, 1.6,
        1.6, 1.5,
    ],
};

pub fn electricity_profile(key: &str) -> Option<&'static ElectricityPriceProfile> {
    match key {
        "flat_rate" => Some(&FLAT_RATE),
        "tou_standard" => Some(&TOU_STANDARD),
        "tou_extreme" => Some(&TOU_EXTREME),
        "renewable_heavy" => Some(&RENEWABLE_HEAVY),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_wrap_around() {
        let weather = weather_profile("typical_summer").unwrap();
        assert_eq!(weather.at_hour(13), weather.at_hour(37));
        assert_eq!(weather.at_hour(13).dry_bulb_temp_c, 36.);

        let workload = workload_pattern("business_hours").unwrap();
        assert_eq!(workload.utilization_at_hour(0), workload.utilization_at_hour(24));

        let price = electricity_profile("tou_extreme").unwrap();
        assert_eq!(price.price_at_hour(13), 0.05 * 3.0);
        assert_eq!(price.price_at_hour(13 + 48), price.price_at_hour(13));
    }

    #[test]
    fn test_utilization_is_clamped() {
        let pattern = workload_pattern("batch_training").unwrap();
        for hour in 0..24 {
            let util = pattern.utilization_at_hour(hour);
            assert!((0. ..=1.).contains(&util));
        }
        // 0.8 * 1.3 exceeds full utilization
        assert_eq!(pattern.utilization_at_hour(13), 1.);
    }

    #[test]
    fn test_unknown_keys() {
        assert!(weather_profile("monsoon").is_none());
        assert!(workload_pattern("idle").is_none());
        assert!(electricity_profile("free").is_none());
    }
}
