//! Power consumption and power distribution models.

pub mod accelerator;
pub mod distribution;
