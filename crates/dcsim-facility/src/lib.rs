#![doc = include_str!("../readme.md")]

pub mod assembler;
pub mod calc;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod failures;
pub mod log;
pub mod model;

pub use assembler::build;
pub use colored;
pub use config::ScenarioParams;
pub use engine::{inject_failure, run_steps, step};
pub use error::ConfigError;
pub use failures::FailureInjector;
pub use model::state::{History, SimulationMetrics, SimulationState};
