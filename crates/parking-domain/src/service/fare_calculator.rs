//! Parking fee calculation
//!
//! Fees are prorated per hour of parking. The first half hour is free and
//! returning vehicles get a 5% discount.
//!
//! # Formula
//! price = hours x rate(type) x (discount_factor if recurring else 1)

use parking_types::{FareError, ParkingType};
use serde::{Deserialize, Serialize};

use crate::model::Ticket;

pub const CAR_RATE_PER_HOUR: f64 = 1.5;
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;
pub const FREE_PERIOD_HOURS: f64 = 0.5;
pub const RECURRING_DISCOUNT_FACTOR: f64 = 0.95;

/// Hourly rates and reductions applied by [`calculate_fare`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareSchedule {
    pub car_rate_per_hour: f64,
    pub bike_rate_per_hour: f64,
    /// Stays at or below this many hours are free
    pub free_period_hours: f64,
    pub discount_factor: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            car_rate_per_hour: CAR_RATE_PER_HOUR,
            bike_rate_per_hour: BIKE_RATE_PER_HOUR,
            free_period_hours: FREE_PERIOD_HOURS,
            discount_factor: RECURRING_DISCOUNT_FACTOR,
        }
    }
}

impl FareSchedule {
    pub fn rate_per_hour(&self, parking_type: ParkingType) -> f64 {
        match parking_type {
            ParkingType::Car => self.car_rate_per_hour,
            ParkingType::Bike => self.bike_rate_per_hour,
        }
    }
}

/// Compute the ticket price and store it in `ticket.price`
///
/// # Arguments
/// * `ticket` - Ticket with `in_time`, `out_time` and spot filled in
/// * `discount` - Apply the recurring-user discount
/// * `schedule` - Rates to charge
///
/// # Errors
/// Returns [`FareError`] when `out_time` is absent or precedes `in_time`.
/// The ticket is left untouched in that case.
pub fn calculate_fare(
    ticket: &mut Ticket,
    discount: bool,
    schedule: &FareSchedule,
) -> Result<(), FareError> {
    let out_time = ticket.out_time.ok_or(FareError::MissingOutTime)?;
    if out_time < ticket.in_time {
        return Err(FareError::OutTimeBeforeInTime {
            in_time: ticket.in_time,
            out_time,
        });
    }

    let duration = ticket.duration_hours().ok_or(FareError::MissingOutTime)?;

    ticket.price = if duration <= schedule.free_period_hours {
        0.0
    } else {
        let price = duration * schedule.rate_per_hour(ticket.parking_spot.parking_type);
        if discount {
            price * schedule.discount_factor
        } else {
            price
        }
    };

    Ok(())
}

/// [`calculate_fare`] without the recurring-user discount
pub fn calculate_fare_default(
    ticket: &mut Ticket,
    schedule: &FareSchedule,
) -> Result<(), FareError> {
    calculate_fare(ticket, false, schedule)
}
