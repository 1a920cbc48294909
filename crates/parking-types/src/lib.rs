//! Core types for parking-system

mod error;
mod types;

pub use error::*;
pub use types::*;
