//! Parking ticket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParkingSpot;

/// Record of one parking session, from entry to exit
///
/// `id` is 0 until the ticket repository assigns one. `out_time` stays
/// `None` while the vehicle is parked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i32,
    pub vehicle_reg_number: String,
    pub parking_spot: ParkingSpot,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
    pub price: f64,
}

impl Ticket {
    /// Open a new, unsaved ticket
    pub fn open(
        vehicle_reg_number: impl Into<String>,
        parking_spot: ParkingSpot,
        in_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            vehicle_reg_number: vehicle_reg_number.into(),
            parking_spot,
            in_time,
            out_time: None,
            price: 0.0,
        }
    }

    /// Whether the vehicle is still parked
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }

    /// Parking duration in hours, if the ticket is closed
    pub fn duration_hours(&self) -> Option<f64> {
        self.out_time
            .map(|out| (out - self.in_time).num_milliseconds() as f64 / 3_600_000.0)
    }
}
