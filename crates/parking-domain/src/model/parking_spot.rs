use parking_types::ParkingType;
use serde::{Deserialize, Serialize};

/// A single parking space of a given vehicle category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: i32,
    pub parking_type: ParkingType,
    pub available: bool,
}

impl ParkingSpot {
    pub fn new(id: i32, parking_type: ParkingType, available: bool) -> Self {
        Self {
            id,
            parking_type,
            available,
        }
    }
}
