//! Application use cases

pub mod parking_service;
pub mod query_service;
pub mod shell;

pub use parking_service::{EntryReceipt, ExitReceipt, ParkingService, ParkingServiceError};
