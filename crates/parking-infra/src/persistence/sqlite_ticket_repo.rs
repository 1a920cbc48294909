//! SQLite implementation of TicketRepository

use std::rc::Rc;

use chrono::{DateTime, Utc};
use parking_domain::model::{ParkingSpot, Ticket};
use parking_domain::repository::TicketRepository;
use parking_types::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_TICKET: &str = "
SELECT t.id, t.vehicle_reg_number, t.price, t.in_time, t.out_time,
       p.id, p.type, p.available
FROM ticket t
JOIN parking_spot p ON p.id = t.parking_spot_id
WHERE t.vehicle_reg_number = ?1
ORDER BY t.id DESC";

/// Raw ticket row before the spot type is decoded
struct TicketRow {
    id: i32,
    vehicle_reg_number: String,
    price: f64,
    in_time: DateTime<Utc>,
    out_time: Option<DateTime<Utc>>,
    spot_id: i32,
    spot_type: String,
    spot_available: bool,
}

impl TicketRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            vehicle_reg_number: r.get(1)?,
            price: r.get(2)?,
            in_time: r.get(3)?,
            out_time: r.get(4)?,
            spot_id: r.get(5)?,
            spot_type: r.get(6)?,
            spot_available: r.get(7)?,
        })
    }

    fn into_ticket(self) -> Result<Ticket> {
        Ok(Ticket {
            id: self.id,
            vehicle_reg_number: self.vehicle_reg_number,
            parking_spot: ParkingSpot::new(
                self.spot_id,
                self.spot_type.parse()?,
                self.spot_available,
            ),
            in_time: self.in_time,
            out_time: self.out_time,
            price: self.price,
        })
    }
}

/// Ticket table access
pub struct SqliteTicketRepository {
    conn: Rc<Connection>,
}

impl SqliteTicketRepository {
    pub(crate) fn new(conn: Rc<Connection>) -> Self {
        Self { conn }
    }
}

impl TicketRepository for SqliteTicketRepository {
    fn get_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>> {
        let query = format!("{SELECT_TICKET} LIMIT 1");
        let row = self
            .conn
            .query_row(&query, [vehicle_reg_number], TicketRow::read)
            .optional()?;
        row.map(TicketRow::into_ticket).transpose()
    }

    fn save_ticket(&self, ticket: &mut Ticket) -> Result<bool> {
        let rows = self.conn.execute(
            "INSERT INTO ticket (parking_spot_id, vehicle_reg_number, price, in_time, out_time)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                ticket.parking_spot.id,
                ticket.vehicle_reg_number,
                ticket.price,
                ticket.in_time,
                ticket.out_time,
            ],
        )?;
        if rows != 1 {
            return Ok(false);
        }
        let rowid = self.conn.last_insert_rowid();
        ticket.id = i32::try_from(rowid)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, rowid))?;
        tracing::debug!(
            ticket = ticket.id,
            vehicle = %ticket.vehicle_reg_number,
            "saved ticket"
        );
        Ok(true)
    }

    fn update_ticket(&self, ticket: &Ticket) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE ticket SET price = ?1, out_time = ?2 WHERE id = ?3",
            params![ticket.price, ticket.out_time, ticket.id],
        )?;
        tracing::debug!(ticket = ticket.id, rows, "update ticket");
        Ok(rows == 1)
    }

    fn get_nb_ticket(&self, vehicle_reg_number: &str) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM ticket WHERE vehicle_reg_number = ?1",
            [vehicle_reg_number],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    fn find_by_vehicle(&self, vehicle_reg_number: &str) -> Result<Vec<Ticket>> {
        let mut stmt = self.conn.prepare(SELECT_TICKET)?;
        let rows = stmt.query_map([vehicle_reg_number], TicketRow::read)?;

        let mut tickets = Vec::new();
        for row in rows {
            tickets.push(row?.into_ticket()?);
        }
        Ok(tickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_loader::SpotLayout;
    use crate::persistence::Database;
    use chrono::{Duration, TimeZone};
    use parking_types::{Error, ParkingType};

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_inventory(&SpotLayout::default()).unwrap();
        db
    }

    fn entry_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap()
    }

    fn ticket_at(plate: &str, spot_id: i32, parking_type: ParkingType) -> Ticket {
        Ticket::open(plate, ParkingSpot::new(spot_id, parking_type, false), entry_time())
    }

    #[test]
    fn test_save_assigns_id() {
        let db = seeded();
        let repo = db.ticket_repository();
        let mut first = ticket_at("ABCDEF", 1, ParkingType::Car);
        let mut second = ticket_at("GHIJKL", 2, ParkingType::Car);

        assert!(repo.save_ticket(&mut first).unwrap());
        assert!(repo.save_ticket(&mut second).unwrap());
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_get_ticket_round_trips_fields() {
        let db = seeded();
        let repo = db.ticket_repository();
        let mut ticket = ticket_at("ABCDEF", 4, ParkingType::Bike);
        repo.save_ticket(&mut ticket).unwrap();

        let loaded = repo.get_ticket("ABCDEF").unwrap().unwrap();
        assert_eq!(loaded.id, ticket.id);
        assert_eq!(loaded.in_time, entry_time());
        assert!(loaded.is_open());
        assert_eq!(loaded.parking_spot.parking_type, ParkingType::Bike);
        assert_eq!(loaded.parking_spot.id, 4);
    }

    #[test]
    fn test_get_ticket_unknown_vehicle() {
        let db = seeded();
        assert!(db.ticket_repository().get_ticket("NOPE").unwrap().is_none());
    }

    #[test]
    fn test_update_sets_out_time_and_price() {
        let db = seeded();
        let repo = db.ticket_repository();
        let mut ticket = ticket_at("ABCDEF", 1, ParkingType::Car);
        repo.save_ticket(&mut ticket).unwrap();

        ticket.out_time = Some(entry_time() + Duration::hours(2));
        ticket.price = 3.0;
        assert!(repo.update_ticket(&ticket).unwrap());

        let loaded = repo.get_ticket("ABCDEF").unwrap().unwrap();
        assert_eq!(loaded.out_time, Some(entry_time() + Duration::hours(2)));
        assert!((loaded.price - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_unsaved_ticket_reports_false() {
        let db = seeded();
        let ticket = ticket_at("ABCDEF", 1, ParkingType::Car);
        assert!(!db.ticket_repository().update_ticket(&ticket).unwrap());
    }

    #[test]
    fn test_save_with_unknown_spot_fails() {
        let db = seeded();
        let mut ticket = ticket_at("ABCDEF", 77, ParkingType::Car);
        let err = db.ticket_repository().save_ticket(&mut ticket).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(ticket.id, 0);
    }

    #[test]
    fn test_count_and_latest_ticket() {
        let db = seeded();
        let repo = db.ticket_repository();
        assert_eq!(repo.get_nb_ticket("ABCDEF").unwrap(), 0);

        let mut first = ticket_at("ABCDEF", 1, ParkingType::Car);
        repo.save_ticket(&mut first).unwrap();
        first.out_time = Some(entry_time() + Duration::hours(1));
        repo.update_ticket(&first).unwrap();

        let mut second = Ticket::open(
            "ABCDEF",
            ParkingSpot::new(2, ParkingType::Car, false),
            entry_time() + Duration::days(1),
        );
        repo.save_ticket(&mut second).unwrap();

        assert_eq!(repo.get_nb_ticket("ABCDEF").unwrap(), 2);
        let latest = repo.get_ticket("ABCDEF").unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert!(latest.is_open());

        let history = repo.find_by_vehicle("ABCDEF").unwrap();
        let ids: Vec<i32> = history.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_save_rejects_id_beyond_i32() {
        let db = seeded();
        db.connection()
            .execute(
                "INSERT INTO ticket (id, parking_spot_id, vehicle_reg_number, in_time)
                 VALUES (?1, 1, 'OLD', ?2)",
                params![i32::MAX, entry_time()],
            )
            .unwrap();

        let mut ticket = ticket_at("ABCDEF", 2, ParkingType::Car);
        let err = db.ticket_repository().save_ticket(&mut ticket).unwrap_err();

        assert!(matches!(
            err,
            Error::Database(rusqlite::Error::IntegralValueOutOfRange(_, _))
        ));
        assert_eq!(ticket.id, 0);
    }
}
