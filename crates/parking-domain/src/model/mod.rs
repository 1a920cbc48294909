//! Domain model types

pub mod parking_spot;
pub mod ticket;

pub use parking_spot::ParkingSpot;
pub use ticket::Ticket;
