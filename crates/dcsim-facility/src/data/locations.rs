//! Facility location presets.

/// Site-dependent electricity and climate parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationPreset {
    pub name: &'static str,
    /// Electricity rate in $/kWh.
    pub electricity_rate: f64,
    /// Grid carbon intensity in g/kWh.
    pub carbon_intensity: f64,
    /// Hours per year suitable for free cooling.
    pub free_cooling_hours: u32,
    pub cooling_design_temp_c: f64,
    pub renewable_ppa_available: bool,
}

static IOWA: LocationPreset = LocationPreset {
    name: "Iowa (Wind Belt)",
    electricity_rate: 0.055,
    carbon_intensity: 350.,
    free_cooling_hours: 4500,
    cooling_design_temp_c: 35.,
    renewable_ppa_available: true,
};

static TEXAS: LocationPreset = LocationPreset {
    name: "Texas (ERCOT)",
    electricity_rate: 0.05,
    carbon_intensity: 380.,
    free_cooling_hours: 1500,
    cooling_design_temp_c: 40.,
    renewable_ppa_available: true,
};

static OREGON: LocationPreset = LocationPreset {
    name: "Oregon (Pacific NW)",
    electricity_rate: 0.06,
    carbon_intensity: 120.,
    free_cooling_hours: 5500,
    cooling_design_temp_c: 30.,
    renewable_ppa_available: true,
};

static VIRGINIA: LocationPreset = LocationPreset {
    name: "Virginia (Data Center Alley)",
    electricity_rate: 0.065,
    carbon_intensity: 300.,
    free_cooling_hours: 3000,
    cooling_design_temp_c: 35.,
    renewable_ppa_available: true,
};

static SWEDEN: LocationPreset = LocationPreset {
    name: "Sweden (Nordic)",
    electricity_rate: 0.04,
    carbon_intensity: 20.,
    free_cooling_hours: 7000,
    cooling_design_temp_c: 25.,
    renewable_ppa_available: true,
};

/// Returns the location preset with the given key.
pub fn location(key: &str) -> Option<&'static LocationPreset> {
    match key {
        "iowa" => Some(&IOWA),
        "texas" => Some(&TEXAS),
        "oregon" => Some(&OREGON),
        "virginia" => Some(&VIRGINIA),
        "sweden" => Some(&SWEDEN),
        _ => None,
    }
}
