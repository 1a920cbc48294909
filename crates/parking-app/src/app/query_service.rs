//! Query Service - Read-only views of the lot
//!
//! - Spot occupancy
//! - Ticket history of a vehicle

use parking_domain::model::{ParkingSpot, Ticket};
use parking_domain::repository::{ParkingSpotRepository, TicketRepository};
use parking_types::{ParkingType, Result};
use serde::Serialize;

/// Free/total counts for one vehicle type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub parking_type: ParkingType,
    pub available: usize,
    pub total: usize,
}

/// Snapshot of every spot in the lot
#[derive(Debug, Clone, Serialize)]
pub struct LotStatus {
    pub spots: Vec<ParkingSpot>,
    pub occupancy: Vec<Occupancy>,
}

/// Current availability of all spots
pub fn lot_status(spots: &impl ParkingSpotRepository) -> Result<LotStatus> {
    let spots = spots.find_all()?;
    let occupancy = [ParkingType::Car, ParkingType::Bike]
        .into_iter()
        .map(|parking_type| {
            let of_type = spots.iter().filter(|s| s.parking_type == parking_type);
            Occupancy {
                parking_type,
                available: of_type.clone().filter(|s| s.available).count(),
                total: of_type.count(),
            }
        })
        .collect();

    Ok(LotStatus { spots, occupancy })
}

/// All tickets of a vehicle, newest first
pub fn vehicle_history(
    tickets: &impl TicketRepository,
    vehicle_reg_number: &str,
) -> Result<Vec<Ticket>> {
    tickets.find_by_vehicle(vehicle_reg_number.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_infra::layout_loader::SpotLayout;
    use parking_infra::persistence::Database;

    #[test]
    fn test_lot_status_counts() {
        let db = Database::open_in_memory().unwrap();
        db.seed_inventory(&SpotLayout::from_counts(2, 3)).unwrap();
        let repo = db.spot_repository();
        repo.update_parking(&ParkingSpot::new(3, ParkingType::Bike, false))
            .unwrap();

        let status = lot_status(&repo).unwrap();

        assert_eq!(status.spots.len(), 5);
        assert_eq!(
            status.occupancy,
            vec![
                Occupancy { parking_type: ParkingType::Car, available: 2, total: 2 },
                Occupancy { parking_type: ParkingType::Bike, available: 2, total: 3 },
            ]
        );
    }

    #[test]
    fn test_vehicle_history_empty() {
        let db = Database::open_in_memory().unwrap();
        assert!(vehicle_history(&db.ticket_repository(), "ABCDEF").unwrap().is_empty());
    }
}
