//! Operator input collaborator

use parking_types::Result;

/// Source of operator answers for the entry and exit workflows
pub trait InputReader {
    /// Vehicle type menu choice: 1 = car, 2 = bike, anything else is invalid.
    fn read_selection(&mut self) -> Result<i32>;

    /// Registration number of the vehicle being processed
    fn read_vehicle_registration_number(&mut self) -> Result<String>;
}
