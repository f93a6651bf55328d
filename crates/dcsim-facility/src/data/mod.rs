//! Read-only configuration tables.

pub mod accelerators;
pub mod curves;
pub mod failure_scenarios;
pub mod locations;
pub mod profiles;
