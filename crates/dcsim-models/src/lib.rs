#![warn(missing_docs)]
#![doc = include_str!("../readme.md")]

pub mod curve;
pub mod power;
pub mod tariff;
pub mod thermal;
