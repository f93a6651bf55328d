//! Facility data model.
//!
//! The facility is described by four layer states (compute, power, thermal, economics), the job
//! scheduler and the list of active failures. All types are plain values, the simulation state is
//! cloned rather than shared between steps.

pub mod compute;
pub mod economics;
pub mod failures;
pub mod power;
pub mod state;
pub mod thermal;
pub mod workload;
