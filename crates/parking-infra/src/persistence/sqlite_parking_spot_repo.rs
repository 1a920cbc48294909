//! SQLite implementation of ParkingSpotRepository

use std::rc::Rc;

use parking_domain::model::ParkingSpot;
use parking_domain::repository::ParkingSpotRepository;
use parking_types::{ParkingType, Result};
use rusqlite::{params, Connection, OptionalExtension};

const NEXT_AVAILABLE_SLOT: &str = "
SELECT MIN(p.id) FROM parking_spot p
WHERE p.type = ?1
  AND p.available = 1
  AND p.id NOT IN (SELECT t.parking_spot_id FROM ticket t WHERE t.out_time IS NULL)";

/// Parking spot table access
pub struct SqliteParkingSpotRepository {
    conn: Rc<Connection>,
}

impl SqliteParkingSpotRepository {
    pub(crate) fn new(conn: Rc<Connection>) -> Self {
        Self { conn }
    }
}

fn spot_from_columns(id: i32, parking_type: &str, available: bool) -> Result<ParkingSpot> {
    Ok(ParkingSpot::new(id, parking_type.parse()?, available))
}

impl ParkingSpotRepository for SqliteParkingSpotRepository {
    fn get_next_available_slot(&self, parking_type: ParkingType) -> Result<Option<i32>> {
        let id: Option<i32> =
            self.conn
                .query_row(NEXT_AVAILABLE_SLOT, [parking_type.as_str()], |r| r.get(0))?;
        Ok(id)
    }

    fn update_parking(&self, spot: &ParkingSpot) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE parking_spot SET available = ?1 WHERE id = ?2",
            params![spot.available, spot.id],
        )?;
        tracing::debug!(spot = spot.id, available = spot.available, rows, "update parking spot");
        Ok(rows == 1)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<ParkingSpot>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, type, available FROM parking_spot WHERE id = ?1",
                [id],
                |r| Ok((r.get::<_, i32>(0)?, r.get::<_, String>(1)?, r.get::<_, bool>(2)?)),
            )
            .optional()?;

        row.map(|(id, t, available)| spot_from_columns(id, &t, available))
            .transpose()
    }

    fn find_all(&self) -> Result<Vec<ParkingSpot>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, type, available FROM parking_spot ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok((r.get::<_, i32>(0)?, r.get::<_, String>(1)?, r.get::<_, bool>(2)?))
        })?;

        let mut spots = Vec::new();
        for row in rows {
            let (id, t, available) = row?;
            spots.push(spot_from_columns(id, &t, available)?);
        }
        Ok(spots)
    }
}
