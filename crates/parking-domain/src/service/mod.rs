//! Domain services

pub mod fare_calculator;

pub use fare_calculator::{calculate_fare, calculate_fare_default, FareSchedule};
