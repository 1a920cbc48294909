//! Repository trait definitions for data persistence
//!
//! `Ok(false)` from a write means the store did not apply it (e.g. no
//! matching row); `Err` means the store itself failed.

use parking_types::{ParkingType, Result};

use crate::model::{ParkingSpot, Ticket};

/// Repository for the fixed parking spot inventory
pub trait ParkingSpotRepository {
    /// Lowest-id available spot of `parking_type` not held by an open ticket
    fn get_next_available_slot(&self, parking_type: ParkingType) -> Result<Option<i32>>;

    /// Persist the availability flag of a spot
    fn update_parking(&self, spot: &ParkingSpot) -> Result<bool>;

    /// Find a spot by id
    fn find_by_id(&self, id: i32) -> Result<Option<ParkingSpot>>;

    /// All spots ordered by id
    fn find_all(&self) -> Result<Vec<ParkingSpot>>;
}

/// Repository for parking tickets
pub trait TicketRepository {
    /// Most recently issued ticket (highest id) for a registration number, with its spot
    fn get_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>>;

    /// Insert a new ticket and store the assigned id back into it
    fn save_ticket(&self, ticket: &mut Ticket) -> Result<bool>;

    /// Persist `out_time` and `price` of an existing ticket
    fn update_ticket(&self, ticket: &Ticket) -> Result<bool>;

    /// Number of tickets on file for a registration number
    fn get_nb_ticket(&self, vehicle_reg_number: &str) -> Result<u32>;

    /// All tickets of a vehicle, newest first
    fn find_by_vehicle(&self, vehicle_reg_number: &str) -> Result<Vec<Ticket>>;
}
