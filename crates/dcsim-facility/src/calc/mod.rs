//! Layer calculators working on the facility data model.
//!
//! Calculators are pure functions of the model values, the physics lives in `dcsim_models`.

pub mod compute;
pub mod economics;
pub mod power;
pub mod thermal;
pub mod workload;
